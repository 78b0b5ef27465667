use crate::calc::cursor::CalendarCursor;
use crate::calc::grid::{GridRenderer, GridStats, GridView};
use crate::data::i18n::Language;
use crate::data::mood_entry::MoodLog;
use crate::data::mood_level::MoodLevel;
use crate::data::mood_store::{MoodStore, migrate_color};
use crate::data::palette::TemplateConfig;
use crate::data::persistence::KeyValueStore;
use crate::data::preferences::{CalendarView, CounterMode, Preferences};
use crate::data::template_registry::{ColorTemplateRegistry, PaletteSink};
use anyhow::Result;
use chrono::NaiveDate;

/// Mood shown for today: the logged one, or the neutral default.
#[derive(Debug, Clone, PartialEq)]
pub struct TodayMood {
    pub level: MoodLevel,
    pub label: String,
    pub logged: bool,
}

/// One session over a store: templates, preferences and the calendar
/// cursor, all pinned to a single `today`.
pub struct Tracker<S: KeyValueStore> {
    store: S,
    registry: ColorTemplateRegistry,
    prefs: Preferences,
    cursor: CalendarCursor,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn open(store: S, extra_templates: Vec<TemplateConfig>, today: NaiveDate) -> Self {
        let mut registry = ColorTemplateRegistry::with_configured(extra_templates);
        registry.load_active(&store);
        let prefs = Preferences::load(&store);
        Tracker {
            store,
            registry,
            prefs,
            cursor: CalendarCursor::new(today),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.cursor.actual_today()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &ColorTemplateRegistry {
        &self.registry
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn cursor(&self) -> &CalendarCursor {
        &self.cursor
    }

    pub fn moods(&mut self) -> MoodStore<'_, S> {
        MoodStore::new(&mut self.store)
    }

    pub fn log(&self) -> MoodLog {
        MoodLog::load(&self.store)
    }

    pub fn log_mood(&mut self, level: MoodLevel) -> Result<bool> {
        self.log_mood_on(self.today(), level)
    }

    /// Stores the active template's colour for `level` on `date`.
    pub fn log_mood_on(&mut self, date: NaiveDate, level: MoodLevel) -> Result<bool> {
        let color = self.registry.color_for_level(level).to_string();
        MoodStore::new(&mut self.store).save(date, Some(&color))
    }

    pub fn set_language(&mut self, language: Language) -> Result<()> {
        self.prefs.set_language(language, &mut self.store)
    }

    pub fn cycle_language(&mut self) -> Result<Language> {
        let next = self.prefs.language.cycle();
        self.set_language(next)?;
        Ok(next)
    }

    pub fn set_counter_mode(&mut self, mode: CounterMode) -> Result<()> {
        self.prefs.set_counter_mode(mode, &mut self.store)
    }

    pub fn toggle_counter_mode(&mut self) -> Result<CounterMode> {
        let next = self.prefs.counter_mode.toggle();
        self.set_counter_mode(next)?;
        Ok(next)
    }

    pub fn set_calendar_view(&mut self, view: CalendarView) -> Result<()> {
        self.prefs.set_calendar_view(view, &mut self.store)
    }

    /// Switches the rendered view for this session only.
    pub fn preview_calendar_view(&mut self, view: CalendarView) {
        self.prefs.calendar_view = view;
    }

    pub fn cycle_calendar_view(&mut self) -> Result<CalendarView> {
        let next = self.prefs.calendar_view.cycle();
        self.set_calendar_view(next)?;
        Ok(next)
    }

    pub fn apply_template(&mut self, id: &str, sink: &mut dyn PaletteSink) -> Result<bool> {
        self.registry.apply_template(id, sink, &mut self.store)
    }

    pub fn cycle_template(&mut self, sink: &mut dyn PaletteSink) -> Result<bool> {
        let next = self.registry.next_template_id().to_string();
        self.apply_template(&next, sink)
    }

    /// Moves the current view one step: a year, a month or a week.
    pub fn navigate(&mut self, forward: bool) {
        self.shift_view(if forward { 1 } else { -1 });
    }

    /// Moves the current view by `steps` years, months or weeks at once.
    pub fn shift_view(&mut self, steps: i32) {
        match self.prefs.calendar_view {
            CalendarView::Year => self.cursor.shift_years(steps),
            CalendarView::Month => self.cursor.shift_months(steps),
            CalendarView::Week => self.cursor.shift_weeks(steps),
        }
    }

    pub fn reset_view(&mut self) {
        self.cursor.reset();
    }

    /// Grid and header stats from a single read of the log.
    pub fn snapshot(&self) -> (GridView, GridStats) {
        let log = self.log();
        let renderer = self.renderer(&log);
        let view = renderer.render();
        let stats = renderer.stats(view.logged_count);
        (view, stats)
    }

    pub fn today_mood(&self, language: Language) -> TodayMood {
        let entry = self.log().get_date(self.today()).cloned();
        let level = entry
            .as_ref()
            .map(|e| self.registry.resolve_level(migrate_color(&e.color)))
            .unwrap_or(MoodLevel::NEUTRAL);
        TodayMood {
            level,
            label: self
                .registry
                .active()
                .style(level)
                .labels
                .get(language)
                .to_string(),
            logged: entry.is_some(),
        }
    }

    fn renderer<'a>(&'a self, log: &'a MoodLog) -> GridRenderer<'a> {
        GridRenderer {
            log,
            registry: &self.registry,
            cursor: &self.cursor,
            language: self.prefs.language,
            mode: self.prefs.calendar_view,
            counter_mode: self.prefs.counter_mode,
        }
    }
}
