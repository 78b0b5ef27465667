use crate::data::KeyValueStore;
use crate::tracker::Tracker;
use anyhow::Result;
use std::path::Path;

pub fn run_fill(data_dir: &Path, days: u32) -> Result<()> {
    let mut tracker = super::open_tracker(data_dir);
    fill(&mut tracker, days, &mut std::io::stdout())
}

pub fn run_clear(data_dir: &Path) -> Result<()> {
    let mut tracker = super::open_tracker(data_dir);
    clear(&mut tracker, &mut std::io::stdout())
}

pub(crate) fn fill<S: KeyValueStore, W: std::io::Write>(
    tracker: &mut Tracker<S>,
    days: u32,
    out: &mut W,
) -> Result<()> {
    let today = tracker.today();
    let inserted = tracker.moods().fill_synthetic_streak(days, today)?;
    writeln!(out, "Inserted {inserted} synthetic day(s)")?;
    if let Some(marker) = tracker.moods().synthetic_marker() {
        writeln!(out, "Synthetic run: {marker} day(s)")?;
    }
    writeln!(out, "Streak: {}", tracker.moods().calculate_streak(today))?;
    Ok(())
}

pub(crate) fn clear<S: KeyValueStore, W: std::io::Write>(
    tracker: &mut Tracker<S>,
    out: &mut W,
) -> Result<()> {
    let removed = tracker.moods().clear_synthetic()?;
    writeln!(out, "Removed {removed} synthetic day(s)")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MoodLevel;
    use crate::data::persistence::MemoryStore;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn run<F>(t: &mut Tracker<MemoryStore>, f: F) -> String
    where
        F: FnOnce(&mut Tracker<MemoryStore>, &mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(t, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_fill_then_clear_keeps_real_entries() {
        let mut t = Tracker::open(MemoryStore::default(), Vec::new(), d(2025, 6, 30));
        t.log_mood_on(d(2025, 6, 29), MoodLevel::Low).unwrap();

        let out = run(&mut t, |t, buf| fill(t, 10, buf));
        assert!(out.contains("Inserted 9 synthetic day(s)"));
        assert!(out.contains("Streak: 10"));
        assert!(out.contains("Synthetic run: 10 day(s)"));

        let out = run(&mut t, |t, buf| clear(t, buf));
        assert!(out.contains("Removed 9 synthetic day(s)"));
        assert_eq!(t.log().len(), 1);
    }

    #[test]
    fn test_fill_zero_days_is_ignored() {
        let mut t = Tracker::open(MemoryStore::default(), Vec::new(), d(2025, 6, 30));
        let out = run(&mut t, |t, buf| fill(t, 0, buf));
        assert!(out.contains("Inserted 0 synthetic day(s)"));
        assert!(t.log().is_empty());
    }
}
