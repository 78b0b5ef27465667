use crate::data::i18n::Language;
use crate::data::persistence::{KeyValueStore, keys};
use anyhow::Result;
use clap::ValueEnum;
use serde_json::Value;
use tracing::warn;

/// What the header counter shows.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterMode {
    #[default]
    Streak,
    Total,
}

impl CounterMode {
    pub fn code(self) -> &'static str {
        match self {
            CounterMode::Streak => "streak",
            CounterMode::Total => "total",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "streak" => Some(CounterMode::Streak),
            "total" => Some(CounterMode::Total),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            CounterMode::Streak => CounterMode::Total,
            CounterMode::Total => CounterMode::Streak,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CalendarView {
    #[default]
    Year,
    Month,
    Week,
}

impl CalendarView {
    pub fn code(self) -> &'static str {
        match self {
            CalendarView::Year => "year",
            CalendarView::Month => "month",
            CalendarView::Week => "week",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "year" => Some(CalendarView::Year),
            "month" => Some(CalendarView::Month),
            "week" => Some(CalendarView::Week),
            _ => None,
        }
    }

    /// Year → month → week → year.
    pub fn cycle(self) -> Self {
        match self {
            CalendarView::Year => CalendarView::Month,
            CalendarView::Month => CalendarView::Week,
            CalendarView::Week => CalendarView::Year,
        }
    }
}

/// User display preferences, persisted as individual store keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub language: Language,
    pub counter_mode: CounterMode,
    pub calendar_view: CalendarView,
}

impl Preferences {
    /// Reads every preference. Missing or unrecognised values use defaults.
    pub fn load<S: KeyValueStore + ?Sized>(kv: &S) -> Self {
        let language = kv
            .get_string(keys::LANGUAGE)
            .map(|code| Language::from_code(&code))
            .unwrap_or_default();
        let counter_mode = read_choice(kv, keys::COUNTER_MODE, CounterMode::from_code);
        let calendar_view = read_choice(kv, keys::CALENDAR_VIEW, CalendarView::from_code);
        Preferences {
            language,
            counter_mode,
            calendar_view,
        }
    }

    pub fn set_language<S: KeyValueStore + ?Sized>(
        &mut self,
        language: Language,
        kv: &mut S,
    ) -> Result<()> {
        kv.set(keys::LANGUAGE, Value::from(language.code()))?;
        self.language = language;
        Ok(())
    }

    pub fn set_counter_mode<S: KeyValueStore + ?Sized>(
        &mut self,
        mode: CounterMode,
        kv: &mut S,
    ) -> Result<()> {
        kv.set(keys::COUNTER_MODE, Value::from(mode.code()))?;
        self.counter_mode = mode;
        Ok(())
    }

    pub fn set_calendar_view<S: KeyValueStore + ?Sized>(
        &mut self,
        view: CalendarView,
        kv: &mut S,
    ) -> Result<()> {
        kv.set(keys::CALENDAR_VIEW, Value::from(view.code()))?;
        self.calendar_view = view;
        Ok(())
    }
}

fn read_choice<S, T>(kv: &S, key: &str, parse: fn(&str) -> Option<T>) -> T
where
    S: KeyValueStore + ?Sized,
    T: Default,
{
    let Some(code) = kv.get_string(key) else {
        return T::default();
    };
    parse(&code).unwrap_or_else(|| {
        warn!("unrecognised value '{code}' for '{key}', using default");
        T::default()
    })
}
