//! Builds the year / month / week day grids and their header stats.
//!
//! Stored colours never reach the output directly: every logged cell is
//! migrated, resolved to a mood level, then repainted with the active
//! template so a theme change recolours the whole history.

use crate::calc::calendar::{enumerate_year, format_for_display, month_length};
use crate::calc::cursor::CalendarCursor;
use crate::calc::streak::streak_heat_level;
use crate::data::i18n::{Language, month_name, t, weekday_abbreviations, weekday_name};
use crate::data::mood_entry::{MoodLog, date_key};
use crate::data::mood_level::MoodLevel;
use crate::data::mood_store::migrate_color;
use crate::data::preferences::{CalendarView, CounterMode};
use crate::data::template_registry::ColorTemplateRegistry;
use chrono::{Datelike, Days, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub key: String,
    pub is_today: bool,
    pub has_entry: bool,
    /// Active-template colour for the logged level.
    pub display_color: Option<String>,
    pub level: Option<MoodLevel>,
    /// `"{date} • {label}"` for logged cells.
    pub tooltip: Option<String>,
    /// Localized weekday name, week view only.
    pub day_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    /// Empty slot aligning the first day of a month to its weekday column.
    Placeholder,
    Day(DayCell),
}

impl GridCell {
    pub fn day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Day(cell) => Some(cell),
            GridCell::Placeholder => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub mode: CalendarView,
    /// Weekday column headers (month view only).
    pub headers: Vec<String>,
    pub cells: Vec<GridCell>,
    pub logged_count: usize,
}

impl GridView {
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::day)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridStats {
    pub header_text: String,
    pub counter_text: String,
    /// 0..=4 intensity, only in streak mode.
    pub heat_level: Option<u8>,
}

pub struct GridRenderer<'a> {
    pub log: &'a MoodLog,
    pub registry: &'a ColorTemplateRegistry,
    pub cursor: &'a CalendarCursor,
    pub language: Language,
    pub mode: CalendarView,
    pub counter_mode: CounterMode,
}

impl GridRenderer<'_> {
    pub fn render(&self) -> GridView {
        let mut headers = Vec::new();
        let mut cells = Vec::new();
        match self.mode {
            CalendarView::Year => {
                let show_today = self.cursor.view_year() == self.cursor.actual_year();
                for (date, key) in enumerate_year(self.cursor.view_year()) {
                    cells.push(GridCell::Day(self.cell(date, key, show_today, None)));
                }
            }
            CalendarView::Month => {
                headers = weekday_abbreviations(self.language)
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                if let Some(first) = self.month_start() {
                    let padding = first.weekday().num_days_from_monday() as usize;
                    cells.extend(std::iter::repeat_n(GridCell::Placeholder, padding));
                    let days = month_length(first.year(), first.month());
                    for date in first.iter_days().take(days as usize) {
                        cells.push(GridCell::Day(self.cell(date, date_key(date), true, None)));
                    }
                }
            }
            CalendarView::Week => {
                for date in self.cursor.view_week_start().iter_days().take(7) {
                    let label = weekday_name(date, self.language).to_string();
                    cells.push(GridCell::Day(self.cell(date, date_key(date), true, Some(label))));
                }
            }
        }
        let logged_count = cells
            .iter()
            .filter_map(GridCell::day)
            .filter(|c| c.has_entry)
            .count();
        GridView {
            mode: self.mode,
            headers,
            cells,
            logged_count,
        }
    }

    pub fn stats(&self, logged_count: usize) -> GridStats {
        let header_text = match self.mode {
            CalendarView::Year => self.cursor.view_year().to_string(),
            CalendarView::Month => format!(
                "{} {}",
                month_name(self.cursor.view_month() + 1, self.language),
                self.cursor.view_year()
            ),
            CalendarView::Week => {
                let start = self.cursor.view_week_start();
                let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
                format!(
                    "{} – {}",
                    format_for_display(start, self.language),
                    format_for_display(end, self.language)
                )
            }
        };
        let (counter_text, heat_level) = match self.counter_mode {
            CounterMode::Total => (
                format!("{} {}", logged_count, t("daysLogged", self.language)),
                None,
            ),
            CounterMode::Streak => {
                let streak = self.log.streak(self.cursor.actual_today());
                (
                    format!("{} {}", streak, t("dayStreak", self.language)),
                    Some(streak_heat_level(streak)),
                )
            }
        };
        GridStats {
            header_text,
            counter_text,
            heat_level,
        }
    }

    fn month_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.cursor.view_year(), self.cursor.view_month() + 1, 1)
    }

    fn cell(
        &self,
        date: NaiveDate,
        key: String,
        show_today: bool,
        day_label: Option<String>,
    ) -> DayCell {
        let is_today = show_today && date == self.cursor.actual_today();
        let Some(entry) = self.log.get(&key) else {
            return DayCell {
                date,
                key,
                is_today,
                has_entry: false,
                display_color: None,
                level: None,
                tooltip: None,
                day_label,
            };
        };
        let level = self.registry.resolve_level(migrate_color(&entry.color));
        let display_color = self.registry.color_for_level(level).to_string();
        let tooltip = format!(
            "{} • {}",
            format_for_display(date, self.language),
            self.registry.resolve_label(&display_color, self.language)
        );
        DayCell {
            date,
            key,
            is_today,
            has_entry: true,
            display_color: Some(display_color),
            level: Some(level),
            tooltip: Some(tooltip),
            day_label,
        }
    }
}
