use crate::calc::calendar::week_start;
use chrono::{Datelike, Days, NaiveDate};

/// Navigation state for the three calendar views.
///
/// `view_month` is zero-based (0 = January) and always kept in 0..=11;
/// `view_week_start` is always a Monday.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarCursor {
    actual_today: NaiveDate,
    view_year: i32,
    view_month: u32,
    view_week_start: NaiveDate,
}

impl CalendarCursor {
    pub fn new(today: NaiveDate) -> Self {
        CalendarCursor {
            actual_today: today,
            view_year: today.year(),
            view_month: today.month0(),
            view_week_start: week_start(today),
        }
    }

    /// Returns every view to the date the cursor was created with.
    pub fn reset(&mut self) {
        *self = CalendarCursor::new(self.actual_today);
    }

    pub fn actual_today(&self) -> NaiveDate {
        self.actual_today
    }

    pub fn actual_year(&self) -> i32 {
        self.actual_today.year()
    }

    pub fn view_year(&self) -> i32 {
        self.view_year
    }

    pub fn view_month(&self) -> u32 {
        self.view_month
    }

    pub fn view_week_start(&self) -> NaiveDate {
        self.view_week_start
    }

    /// Moves the year view by `steps`. Stays put when the target year falls
    /// outside the supported date range.
    pub fn shift_years(&mut self, steps: i32) {
        if let Some(year) = self.view_year.checked_add(steps).filter(|y| year_in_range(*y)) {
            self.view_year = year;
        }
    }

    /// Moves the month view by `steps`, rolling the year past December and
    /// January.
    pub fn shift_months(&mut self, steps: i32) {
        let total = i64::from(self.view_year) * 12 + i64::from(self.view_month) + i64::from(steps);
        let year = i32::try_from(total.div_euclid(12)).ok().filter(|y| year_in_range(*y));
        if let Some(year) = year {
            self.view_year = year;
            self.view_month = total.rem_euclid(12) as u32;
        }
    }

    /// Moves the week view by `steps` whole weeks.
    pub fn shift_weeks(&mut self, steps: i32) {
        let days = Days::new(u64::from(steps.unsigned_abs()) * 7);
        let moved = if steps >= 0 {
            self.view_week_start.checked_add_days(days)
        } else {
            self.view_week_start.checked_sub_days(days)
        };
        if let Some(start) = moved {
            self.view_week_start = start;
        }
    }

    pub fn next_year(&mut self) {
        self.shift_years(1);
    }

    pub fn prev_year(&mut self) {
        self.shift_years(-1);
    }

    pub fn next_month(&mut self) {
        self.shift_months(1);
    }

    pub fn prev_month(&mut self) {
        self.shift_months(-1);
    }

    pub fn next_week(&mut self) {
        self.shift_weeks(1);
    }

    pub fn prev_week(&mut self) {
        self.shift_weeks(-1);
    }
}

fn year_in_range(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some() && NaiveDate::from_ymd_opt(year, 12, 31).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Weekday};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_initialises_from_today() {
        // 2025-01-15 is a Wednesday
        let cursor = CalendarCursor::new(d(2025, 1, 15));
        assert_eq!(cursor.view_year(), 2025);
        assert_eq!(cursor.view_month(), 0);
        assert_eq!(cursor.view_week_start(), d(2025, 1, 13));
        assert_eq!(cursor.actual_year(), 2025);
    }

    #[test]
    fn test_month_increment_rolls_into_next_year() {
        let mut cursor = CalendarCursor::new(d(2025, 12, 10));
        assert_eq!(cursor.view_month(), 11);
        cursor.next_month();
        assert_eq!(cursor.view_month(), 0);
        assert_eq!(cursor.view_year(), 2026);
    }

    #[test]
    fn test_month_decrement_rolls_into_previous_year() {
        let mut cursor = CalendarCursor::new(d(2026, 1, 10));
        cursor.prev_month();
        assert_eq!(cursor.view_month(), 11);
        assert_eq!(cursor.view_year(), 2025);
    }

    #[test]
    fn test_shift_months_normalises() {
        let mut cursor = CalendarCursor::new(d(2025, 6, 1));
        cursor.shift_months(9);
        assert_eq!((cursor.view_year(), cursor.view_month()), (2026, 2));
        cursor.shift_months(-3);
        assert_eq!((cursor.view_year(), cursor.view_month()), (2025, 11));
        cursor.shift_months(-24);
        assert_eq!((cursor.view_year(), cursor.view_month()), (2023, 11));
    }

    #[test]
    fn test_shift_beyond_date_range_leaves_cursor() {
        let mut cursor = CalendarCursor::new(d(2025, 1, 15));
        let initial = cursor.clone();
        cursor.shift_weeks(14_000_000);
        cursor.shift_weeks(i32::MIN);
        cursor.shift_months(i32::MAX);
        cursor.shift_years(i32::MAX);
        cursor.shift_years(i32::MIN);
        assert_eq!(cursor, initial);

        cursor.shift_years(-2025);
        assert_eq!(cursor.view_year(), 0);
        cursor.shift_weeks(52);
        assert_eq!(cursor.view_week_start(), d(2026, 1, 12));
    }

    #[test]
    fn test_week_navigation_moves_seven_days() {
        let mut cursor = CalendarCursor::new(d(2025, 12, 29));
        let initial = cursor.view_week_start();
        cursor.next_week();
        assert_eq!(cursor.view_week_start() - initial, Duration::days(7));
        assert_eq!(cursor.view_week_start(), d(2026, 1, 5));
        cursor.prev_week();
        cursor.prev_week();
        assert_eq!(initial - cursor.view_week_start(), Duration::days(7));
        assert_eq!(cursor.view_week_start().weekday(), Weekday::Mon);
    }

    #[test]
    fn test_year_navigation_leaves_actual_year() {
        let mut cursor = CalendarCursor::new(d(2025, 3, 1));
        cursor.next_year();
        cursor.next_year();
        assert_eq!(cursor.view_year(), 2027);
        cursor.prev_year();
        assert_eq!(cursor.view_year(), 2026);
        assert_eq!(cursor.actual_year(), 2025);
    }

    #[test]
    fn test_reset_restores_all_views() {
        let today = d(2025, 3, 12);
        let mut cursor = CalendarCursor::new(today);
        cursor.shift_years(-25);
        cursor.shift_months(-2);
        cursor.next_week();
        cursor.next_week();
        cursor.reset();
        assert_eq!(cursor, CalendarCursor::new(today));
    }
}
