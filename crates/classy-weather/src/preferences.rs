//! Persisted key/value preferences (the last searched location).

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key under which the last accepted location query is stored.
pub const LOCATION_KEY: &str = "location";

/// Durable string preferences.
///
/// `load` never fails: a missing key or unreadable backing store yields the
/// store's default. `save` is best-effort and never reports failure.
pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: &str) -> String;
    fn save(&self, key: &str, value: &str);
}

/// Preferences stored as a JSON object in a single file
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    default: String,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>, default: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default: default.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> std::io::Result<BTreeMap<String, String>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e),
        };
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, json)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, key: &str) -> String {
        let _guard = self.lock.lock();
        match self.read_all() {
            Ok(values) => values.get(key).cloned().unwrap_or_else(|| self.default.clone()),
            Err(e) => {
                tracing::warn!(
                    "Failed to read preferences from {}: {}",
                    self.path.display(),
                    e
                );
                self.default.clone()
            }
        }
    }

    fn save(&self, key: &str, value: &str) {
        let _guard = self.lock.lock();
        // A corrupt file is replaced rather than blocking every future save
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        match self.write_all(&values) {
            Ok(()) => tracing::debug!("Saved preference {} = {:?}", key, value),
            Err(e) => tracing::warn!(
                "Failed to save preference {} to {}: {}",
                key,
                self.path.display(),
                e
            ),
        }
    }
}

/// In-process preferences, lost when the store is dropped
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
    default: String,
}

impl MemoryPreferenceStore {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            values: Mutex::new(BTreeMap::new()),
            default: default.into(),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> String {
        self.values
            .lock()
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    fn save(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        FilePreferenceStore::new(&path, "london").save(LOCATION_KEY, "paris");

        // Fresh store, same file: simulates a restart
        let reopened = FilePreferenceStore::new(&path, "london");
        assert_eq!(reopened.load(LOCATION_KEY), "paris");
    }

    #[test]
    fn test_file_store_missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("missing.json"), "london");
        assert_eq!(store.load(LOCATION_KEY), "london");
    }

    #[test]
    fn test_file_store_corrupt_file_uses_default_and_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();

        let store = FilePreferenceStore::new(&path, "");
        assert_eq!(store.load(LOCATION_KEY), "");

        store.save(LOCATION_KEY, "lisbon");
        assert_eq!(store.load(LOCATION_KEY), "lisbon");
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("prefs.json");
        let store = FilePreferenceStore::new(&path, "");

        store.save(LOCATION_KEY, "tokyo");

        assert!(path.exists());
        assert_eq!(store.load(LOCATION_KEY), "tokyo");
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs.json"), "");

        store.save("units", "metric");
        store.save(LOCATION_KEY, "oslo");

        assert_eq!(store.load("units"), "metric");
        assert_eq!(store.load(LOCATION_KEY), "oslo");
    }

    #[test]
    fn test_file_store_save_failure_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        // The path is a directory, so the write fails
        let store = FilePreferenceStore::new(dir.path(), "fallback");
        store.save(LOCATION_KEY, "rome");
        assert_eq!(store.load(LOCATION_KEY), "fallback");
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryPreferenceStore::new("london");
        assert_eq!(store.load(LOCATION_KEY), "london");
        store.save(LOCATION_KEY, "berlin");
        assert_eq!(store.load(LOCATION_KEY), "berlin");
    }
}
