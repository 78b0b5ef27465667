use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Logical keys of the local key-value store.
pub mod keys {
    pub const MOOD_TRACKER: &str = "moodTracker";
    pub const LANGUAGE: &str = "language";
    pub const COUNTER_MODE: &str = "counterMode";
    pub const CALENDAR_VIEW: &str = "calendarView";
    pub const COLOR_TEMPLATE: &str = "colorTemplate";
    pub const TEST_STREAK_DAYS: &str = "testStreakDays";
}

pub trait Persistable: Sized + Default + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;
    fn is_json() -> bool;

    /// Load from `dir`. A missing file yields `Default`.
    fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::filename());
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if Self::is_json() {
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse JSON from {}", path.display()))
        } else {
            serde_norway::from_str(&contents)
                .with_context(|| format!("failed to parse YAML from {}", path.display()))
        }
    }

    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = if Self::is_json() {
            serde_json::to_string_pretty(self).context("failed to serialize JSON")?
        } else {
            serde_norway::to_string(self).context("failed to serialize YAML")?
        };
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

/// The persistence port every component reads and writes through.
///
/// Reads are infallible: an absent key is `None`. Writes must be visible
/// to the next read on the same store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    /// String value for `key`. Non-string values are treated as absent.
    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            other => {
                warn!("ignoring non-string value for '{key}': {other}");
                None
            }
        }
    }
}

/// In-process store. Used by tests and as a scratch store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(transparent)]
struct StorageDocument(BTreeMap<String, Value>);

impl Persistable for StorageDocument {
    fn filename() -> &'static str {
        "storage.json"
    }
    fn is_json() -> bool {
        true
    }
}

/// Key-value store backed by a single `storage.json` in the data directory.
/// The document is read once on open and written through on every change.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    document: StorageDocument,
}

impl FileStore {
    /// Opens the store in `dir`. An unreadable or corrupt document is set
    /// aside as `storage.json.corrupt` and the store starts empty.
    pub fn open(dir: &Path) -> Self {
        let document = match StorageDocument::load_from(dir) {
            Ok(document) => document,
            Err(err) => {
                warn!("starting with an empty store: {err:#}");
                let path = dir.join(StorageDocument::filename());
                let backup = path.with_extension("json.corrupt");
                if let Err(copy_err) = fs::copy(&path, &backup) {
                    warn!("could not back up {}: {copy_err}", path.display());
                }
                StorageDocument::default()
            }
        };
        debug!(dir = %dir.display(), keys = document.0.len(), "opened store");
        FileStore {
            dir: dir.to_path_buf(),
            document,
        }
    }

    /// Writes `document` to disk, then makes it the live copy. A failed
    /// write leaves the live copy untouched.
    fn commit(&mut self, document: StorageDocument) -> Result<()> {
        document.save_to(&self.dir)?;
        self.document = document;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.document.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut next = self.document.clone();
        next.0.insert(key.to_string(), value);
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.document.0.contains_key(key) {
            return Ok(());
        }
        let mut next = self.document.clone();
        next.0.remove(key);
        self.commit(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct TestYamlData {
        count: u32,
    }

    impl Persistable for TestYamlData {
        fn filename() -> &'static str {
            "test_data.yaml"
        }
        fn is_json() -> bool {
            false
        }
    }

    #[test]
    fn test_load_from_returns_default_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let result = TestYamlData::load_from(tmp.path()).unwrap();
        assert_eq!(result, TestYamlData::default());
    }

    #[test]
    fn test_yaml_save_to_and_load_from() {
        let tmp = TempDir::new().unwrap();
        let data = TestYamlData { count: 99 };
        data.save_to(tmp.path()).unwrap();
        let loaded = TestYamlData::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_save_to_creates_directory_if_missing() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        TestYamlData { count: 1 }.save_to(&nested).unwrap();
        assert!(nested.join("test_data.yaml").exists());
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::default();
        assert!(store.get("language").is_none());
        store.set("language", json!("fr")).unwrap();
        assert_eq!(store.get_string("language").as_deref(), Some("fr"));
        store.remove("language").unwrap();
        assert!(store.get("language").is_none());
    }

    #[test]
    fn test_get_string_ignores_non_string_values() {
        let mut store = MemoryStore::default();
        store.set("language", json!(42)).unwrap();
        assert_eq!(store.get_string("language"), None);
    }

    #[test]
    fn test_file_store_writes_through() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::open(tmp.path());
        store.set(keys::LANGUAGE, json!("pt")).unwrap();

        let reopened = FileStore::open(tmp.path());
        assert_eq!(reopened.get_string(keys::LANGUAGE).as_deref(), Some("pt"));
    }

    #[test]
    fn test_file_store_read_your_writes() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::open(tmp.path());
        store.set(keys::COUNTER_MODE, json!("total")).unwrap();
        assert_eq!(store.get_string(keys::COUNTER_MODE).as_deref(), Some("total"));
    }

    #[test]
    fn test_file_store_corrupt_document_opens_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("storage.json"), "{not json").unwrap();
        let store = FileStore::open(tmp.path());
        assert!(store.get(keys::MOOD_TRACKER).is_none());
        assert!(tmp.path().join("storage.json.corrupt").exists());
    }

    #[test]
    fn test_file_store_failed_write_keeps_previous_state() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let mut store = FileStore::open(&blocker);
        assert!(store.set(keys::LANGUAGE, json!("fr")).is_err());
        assert!(store.get(keys::LANGUAGE).is_none());
    }

    #[test]
    fn test_file_store_remove_missing_key_is_noop() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::open(tmp.path());
        store.remove(keys::TEST_STREAK_DAYS).unwrap();
        assert!(!tmp.path().join("storage.json").exists());
    }
}
