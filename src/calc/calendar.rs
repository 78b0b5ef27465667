use crate::data::i18n::{Language, short_month_name};
use crate::data::mood_entry::date_key;
use chrono::{Datelike, Duration, Local, NaiveDate};

/// The current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Iterator over every day of a year, Jan 1 through Dec 31, paired with
/// its `YYYY-MM-DD` key.
#[derive(Clone, Debug)]
pub struct YearDates {
    next: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl Iterator for YearDates {
    type Item = (NaiveDate, String);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let end = self.end?;
        if current > end {
            self.next = None;
            return None;
        }
        self.next = current.succ_opt();
        Some((current, date_key(current)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.next, self.end) {
            (Some(next), Some(end)) if next <= end => {
                let n = (end - next).num_days() as usize + 1;
                (n, Some(n))
            }
            _ => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for YearDates {}

pub fn enumerate_year(year: i32) -> YearDates {
    YearDates {
        next: NaiveDate::from_ymd_opt(year, 1, 1),
        end: NaiveDate::from_ymd_opt(year, 12, 31),
    }
}

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    // Sunday is 6 days past Monday, every other day is (weekday - 1).
    let back = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(back)
}

/// Last day of a 1-based month.
pub fn month_length(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Short month + day in the language's conventional order.
pub fn format_for_display(date: NaiveDate, language: Language) -> String {
    let month = short_month_name(date.month(), language);
    match language {
        Language::En => format!("{} {}", month, date.day()),
        Language::Fr => format!("{} {}", date.day(), month),
        Language::Pt => format!("{} de {}", date.day(), month),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_enumerate_year_length_matches_leap_rule() {
        for year in [1900, 1999, 2000, 2023, 2024, 2025, 2100, 2400] {
            let expected = if is_leap_year(year) { 366 } else { 365 };
            assert_eq!(enumerate_year(year).count(), expected, "year {year}");
        }
    }

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2025));
    }

    #[test]
    fn test_enumerate_year_bounds_and_order() {
        let dates: Vec<(NaiveDate, String)> = enumerate_year(2025).collect();
        assert_eq!(dates.first().unwrap().1, "2025-01-01");
        assert_eq!(dates.last().unwrap().1, "2025-12-31");
        assert!(dates.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_enumerate_year_is_restartable() {
        let first: Vec<String> = enumerate_year(2024).map(|(_, k)| k).collect();
        let second: Vec<String> = enumerate_year(2024).map(|(_, k)| k).collect();
        assert_eq!(first, second);
        assert_eq!(enumerate_year(2024).len(), 366);
    }

    #[test]
    fn test_week_start_wednesday() {
        // 2025-01-15 is a Wednesday
        assert_eq!(week_start(d(2025, 1, 15)), d(2025, 1, 13));
    }

    #[test]
    fn test_week_start_monday_is_itself() {
        assert_eq!(week_start(d(2025, 1, 13)), d(2025, 1, 13));
    }

    #[test]
    fn test_week_start_sunday_goes_back_six_days() {
        assert_eq!(week_start(d(2025, 1, 19)), d(2025, 1, 13));
    }

    #[test]
    fn test_week_start_crosses_month_boundary() {
        // 2025-02-01 is a Saturday
        assert_eq!(week_start(d(2025, 2, 1)), d(2025, 1, 27));
    }

    #[test]
    fn test_week_start_is_monday_and_idempotent() {
        for (date, _) in enumerate_year(2024) {
            let start = week_start(date);
            assert_eq!(start.weekday(), Weekday::Mon);
            assert_eq!(week_start(start), start);
            assert!((date - start).num_days() < 7);
        }
    }

    #[test]
    fn test_month_length() {
        assert_eq!(month_length(2025, 1), 31);
        assert_eq!(month_length(2025, 2), 28);
        assert_eq!(month_length(2024, 2), 29);
        assert_eq!(month_length(2025, 4), 30);
        assert_eq!(month_length(2025, 12), 31);
    }

    #[test]
    fn test_format_for_display_per_language() {
        let date = d(2025, 1, 15);
        assert_eq!(format_for_display(date, Language::En), "Jan 15");
        assert_eq!(format_for_display(date, Language::Fr), "15 janv.");
        assert_eq!(format_for_display(date, Language::Pt), "15 de jan.");
    }
}
