use crate::data::mood_entry::date_key;
use crate::data::{KeyValueStore, MoodLevel};
use crate::tracker::Tracker;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use std::path::Path;

pub fn run(data_dir: &Path, mood: MoodLevel, date: Option<NaiveDate>) -> Result<()> {
    let mut tracker = super::open_tracker(data_dir);
    log_mood(&mut tracker, mood, date, &mut std::io::stdout())
}

pub(crate) fn log_mood<S: KeyValueStore, W: std::io::Write>(
    tracker: &mut Tracker<S>,
    mood: MoodLevel,
    date: Option<NaiveDate>,
    out: &mut W,
) -> Result<()> {
    let today = tracker.today();
    let date = date.unwrap_or(today);
    if date > today {
        bail!("cannot log a mood for {}, it is in the future", date_key(date));
    }
    tracker.log_mood_on(date, mood)?;

    let language = tracker.preferences().language;
    let label = tracker.registry().active().style(mood).labels.get(language);
    writeln!(out, "Logged {} ({}) for {}", label, mood.value(), date_key(date))?;
    writeln!(out, "Streak: {}", tracker.log().streak(today))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::persistence::MemoryStore;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn tracker(today: NaiveDate) -> Tracker<MemoryStore> {
        Tracker::open(MemoryStore::default(), Vec::new(), today)
    }

    #[test]
    fn test_log_defaults_to_today() {
        let mut t = tracker(d(2025, 4, 2));
        let mut buf = Vec::new();
        log_mood(&mut t, MoodLevel::Fine, None, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Logged Fine (2) for 2025-04-02"));
        assert!(out.contains("Streak: 1"));
        assert!(t.log().has_date(d(2025, 4, 2)));
    }

    #[test]
    fn test_log_past_date() {
        let mut t = tracker(d(2025, 4, 2));
        let mut buf = Vec::new();
        log_mood(&mut t, MoodLevel::Low, Some(d(2025, 4, 1)), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("for 2025-04-01"));
        assert!(out.contains("Streak: 1"));
    }

    #[test]
    fn test_log_future_date_is_rejected() {
        let mut t = tracker(d(2025, 4, 2));
        let mut buf = Vec::new();
        let err = log_mood(&mut t, MoodLevel::Low, Some(d(2025, 4, 3)), &mut buf).unwrap_err();
        assert!(format!("{err}").contains("2025-04-03"));
        assert!(t.log().is_empty());
    }
}
