use crate::data::i18n::Language;
use crate::data::{CalendarView, CounterMode, KeyValueStore};
use crate::tracker::Tracker;
use anyhow::Result;
use std::path::Path;

pub fn run(
    data_dir: &Path,
    language: Option<Language>,
    counter: Option<CounterMode>,
    view: Option<CalendarView>,
) -> Result<()> {
    let mut tracker = super::open_tracker(data_dir);
    update_settings(&mut tracker, language, counter, view)?;
    write_settings(&tracker, &mut std::io::stdout())
}

pub(crate) fn update_settings<S: KeyValueStore>(
    tracker: &mut Tracker<S>,
    language: Option<Language>,
    counter: Option<CounterMode>,
    view: Option<CalendarView>,
) -> Result<()> {
    if let Some(language) = language {
        tracker.set_language(language)?;
    }
    if let Some(counter) = counter {
        tracker.set_counter_mode(counter)?;
    }
    if let Some(view) = view {
        tracker.set_calendar_view(view)?;
    }
    Ok(())
}

pub(crate) fn write_settings<S: KeyValueStore, W: std::io::Write>(
    tracker: &Tracker<S>,
    out: &mut W,
) -> Result<()> {
    let prefs = tracker.preferences();
    writeln!(out, "Settings")?;
    writeln!(out, "---")?;
    writeln!(out, "{:<16} {}", "Language:", prefs.language.code())?;
    writeln!(out, "{:<16} {}", "Counter:", prefs.counter_mode.code())?;
    writeln!(out, "{:<16} {}", "View:", prefs.calendar_view.code())?;
    writeln!(out, "{:<16} {}", "Template:", tracker.registry().active_template())?;
    Ok(())
}
