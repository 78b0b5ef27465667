use crate::calc::streak::streak_ending_at;
use crate::data::mood_entry::{MoodEntry, MoodLog};
use crate::data::palette::{COLOR_MIGRATIONS, SYNTHETIC_MOOD_COLOR};
use crate::data::persistence::{KeyValueStore, keys};
use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Upper bound for the synthetic streak filler.
pub const MAX_SYNTHETIC_DAYS: u32 = 365;

/// Maps a legacy hex colour to its RGBA successor. Unknown and
/// already-current colours pass through unchanged.
pub fn migrate_color(color: &str) -> &str {
    COLOR_MIGRATIONS
        .iter()
        .find(|(old, _)| *old == color)
        .map(|(_, new)| *new)
        .unwrap_or(color)
}

/// Date → mood persistence on top of a key-value store.
pub struct MoodStore<'a, S: KeyValueStore + ?Sized> {
    kv: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> MoodStore<'a, S> {
    pub fn new(kv: &'a mut S) -> Self {
        MoodStore { kv }
    }

    /// Every persisted entry. Missing or corrupt data reads as empty.
    pub fn get_all(&self) -> MoodLog {
        MoodLog::load(&*self.kv)
    }

    pub fn get(&self, date: NaiveDate) -> Option<MoodEntry> {
        self.get_all().get_date(date).cloned()
    }

    /// Records `color` for `date`, replacing any earlier entry. A missing or
    /// empty colour means nothing was selected and is ignored; returns
    /// whether an entry was written.
    pub fn save(&mut self, date: NaiveDate, color: Option<&str>) -> Result<bool> {
        let Some(color) = color.filter(|c| !c.trim().is_empty()) else {
            debug!(%date, "no mood selected, nothing saved");
            return Ok(false);
        };
        let mut log = self.get_all();
        log.upsert(date, MoodEntry::new(color, Utc::now()));
        self.write(&log)?;
        info!(%date, color, "saved mood");
        Ok(true)
    }

    pub fn calculate_streak(&self, today: NaiveDate) -> u32 {
        self.get_all().streak(today)
    }

    /// Backfills up to `days` consecutive dates ending at `today` with a
    /// synthetic positive mood, leaving already-logged dates alone. Returns
    /// the number of entries inserted.
    pub fn fill_synthetic_streak(&mut self, days: u32, today: NaiveDate) -> Result<usize> {
        if days == 0 {
            warn!("ignoring synthetic fill of zero days");
            return Ok(0);
        }
        let days = if days > MAX_SYNTHETIC_DAYS {
            warn!(requested = days, max = MAX_SYNTHETIC_DAYS, "clamping synthetic fill");
            MAX_SYNTHETIC_DAYS
        } else {
            days
        };

        let mut log = self.get_all();
        let now = Utc::now();
        let mut inserted = 0;
        for offset in 0..days {
            let date = today - Duration::days(offset as i64);
            if log.has_date(date) {
                continue;
            }
            log.upsert(date, MoodEntry::synthetic(SYNTHETIC_MOOD_COLOR, now));
            inserted += 1;
        }
        self.write(&log)?;
        self.kv.set(keys::TEST_STREAK_DAYS, Value::from(days))?;
        info!(days, inserted, "filled synthetic streak");
        Ok(inserted)
    }

    /// Removes synthetic entries only. Returns how many were removed.
    pub fn clear_synthetic(&mut self) -> Result<usize> {
        let mut log = self.get_all();
        let removed = log.remove_synthetic();
        if removed > 0 {
            self.write(&log)?;
        }
        self.kv.remove(keys::TEST_STREAK_DAYS)?;
        info!(removed, "cleared synthetic entries");
        Ok(removed)
    }

    /// Day count of the last synthetic fill, while synthetic data exists.
    pub fn synthetic_marker(&self) -> Option<u32> {
        self.kv
            .get(keys::TEST_STREAK_DAYS)
            .and_then(|v| v.as_u64())
            .and_then(|n| u32::try_from(n).ok())
    }

    fn write(&mut self, log: &MoodLog) -> Result<()> {
        self.kv.set(keys::MOOD_TRACKER, log.to_value())
    }
}

impl MoodLog {
    /// Reads the persisted log without taking a writable store.
    pub fn load<S: KeyValueStore + ?Sized>(kv: &S) -> Self {
        kv.get(keys::MOOD_TRACKER)
            .map(MoodLog::from_value)
            .unwrap_or_default()
    }

    pub fn streak(&self, today: NaiveDate) -> u32 {
        streak_ending_at(today, |date| self.has_date(date))
    }
}
