use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Formats a date as the `YYYY-MM-DD` key used by the mood map.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MoodEntry {
    /// Colour as stored, possibly in a legacy format.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "isTest", default, skip_serializing_if = "is_false")]
    pub is_synthetic: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl MoodEntry {
    pub fn new(color: &str, timestamp: DateTime<Utc>) -> Self {
        MoodEntry {
            color: color.to_string(),
            timestamp: Some(timestamp),
            is_synthetic: false,
        }
    }

    pub fn synthetic(color: &str, timestamp: DateTime<Utc>) -> Self {
        MoodEntry {
            is_synthetic: true,
            ..MoodEntry::new(color, timestamp)
        }
    }
}

/// All logged moods keyed by `YYYY-MM-DD`. At most one entry per date.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct MoodLog {
    pub entries: BTreeMap<String, MoodEntry>,
}

impl MoodLog {
    /// Builds a log from the persisted JSON value. Anything that is not an
    /// object yields an empty log; malformed entries and keys that are not
    /// dates are dropped.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(map) = value else {
            warn!("mood data is not an object, ignoring it");
            return MoodLog::default();
        };
        let mut log = MoodLog::default();
        for (key, raw) in map {
            if parse_date_key(&key).is_none() {
                warn!("skipping mood entry with invalid date key '{key}'");
                continue;
            }
            match serde_json::from_value::<MoodEntry>(raw) {
                Ok(entry) => {
                    log.entries.insert(key, entry);
                }
                Err(err) => warn!("skipping malformed mood entry for {key}: {err}"),
            }
        }
        log
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()))
    }

    pub fn get(&self, key: &str) -> Option<&MoodEntry> {
        self.entries.get(key)
    }

    pub fn get_date(&self, date: NaiveDate) -> Option<&MoodEntry> {
        self.entries.get(&date_key(date))
    }

    pub fn has_date(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date_key(date))
    }

    /// Inserts or overwrites the entry for `date`.
    pub fn upsert(&mut self, date: NaiveDate, entry: MoodEntry) {
        self.entries.insert(date_key(date), entry);
    }

    /// Removes synthetic entries and returns how many were removed.
    pub fn remove_synthetic(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_synthetic);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ts() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_date_key_zero_pads() {
        assert_eq!(date_key(d(2025, 3, 5)), "2025-03-05");
    }

    #[test]
    fn test_from_value_parses_entries() {
        let value = json!({
            "2025-01-15": { "color": "rgba(144, 238, 144, 0.9)", "timestamp": "2025-01-15T12:00:00Z" },
            "2025-01-16": { "color": "#90ee90", "isTest": true }
        });
        let log = MoodLog::from_value(value);
        assert_eq!(log.len(), 2);
        assert_eq!(log.get("2025-01-15").unwrap().timestamp, Some(ts()));
        assert!(log.get("2025-01-16").unwrap().is_synthetic);
        assert!(log.get("2025-01-16").unwrap().timestamp.is_none());
    }

    #[test]
    fn test_from_value_non_object_is_empty() {
        assert!(MoodLog::from_value(json!("garbage")).is_empty());
        assert!(MoodLog::from_value(json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_from_value_skips_bad_entries() {
        let value = json!({
            "2025-01-15": { "color": "rgba(144, 238, 144, 0.9)" },
            "not-a-date": { "color": "rgba(144, 238, 144, 0.9)" },
            "2025-01-17": { "colour": 7 }
        });
        let log = MoodLog::from_value(value);
        assert_eq!(log.len(), 1);
        assert!(log.has_date(d(2025, 1, 15)));
    }

    #[test]
    fn test_to_value_uses_stored_field_names() {
        let mut log = MoodLog::default();
        log.upsert(d(2025, 1, 15), MoodEntry::synthetic("rgba(1, 2, 3, 0.5)", ts()));
        let value = log.to_value();
        assert_eq!(value["2025-01-15"]["color"], "rgba(1, 2, 3, 0.5)");
        assert_eq!(value["2025-01-15"]["isTest"], true);
        assert!(value["2025-01-15"]["timestamp"].is_string());
    }

    #[test]
    fn test_genuine_entry_omits_is_test() {
        let mut log = MoodLog::default();
        log.upsert(d(2025, 1, 15), MoodEntry::new("rgba(1, 2, 3, 0.5)", ts()));
        let value = log.to_value();
        assert!(value["2025-01-15"].get("isTest").is_none());
    }

    #[test]
    fn test_upsert_overwrites_same_date() {
        let mut log = MoodLog::default();
        log.upsert(d(2025, 1, 15), MoodEntry::new("first", ts()));
        log.upsert(d(2025, 1, 15), MoodEntry::new("second", ts()));
        assert_eq!(log.len(), 1);
        assert_eq!(log.get_date(d(2025, 1, 15)).unwrap().color, "second");
    }

    #[test]
    fn test_remove_synthetic_keeps_genuine() {
        let mut log = MoodLog::default();
        log.upsert(d(2025, 1, 14), MoodEntry::new("real", ts()));
        log.upsert(d(2025, 1, 15), MoodEntry::synthetic("fake", ts()));
        log.upsert(d(2025, 1, 16), MoodEntry::synthetic("fake", ts()));
        assert_eq!(log.remove_synthetic(), 2);
        assert_eq!(log.len(), 1);
        assert!(log.has_date(d(2025, 1, 14)));
    }
}
