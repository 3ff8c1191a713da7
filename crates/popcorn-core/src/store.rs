use popcorn_models::WatchedEntry;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("watched list I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize watched list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable slot for the watched list, read once at startup and overwritten
/// wholesale on every change.
pub trait WatchedStore {
    /// `None` on first run or when the slot holds nothing usable
    fn load(&self) -> Result<Option<Vec<WatchedEntry>>, StoreError>;
    fn save(&mut self, entries: &[WatchedEntry]) -> Result<(), StoreError>;
}

/// JSON file storage for the watched list
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl WatchedStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<WatchedEntry>>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Watched list does not exist yet");
            return Ok(None);
        }

        let content = std::fs::read(&self.path)?;

        // `null` is what the browser slot held before anything was added.
        // Bad encoding is a decode failure like any other.
        match serde_json::from_slice::<Option<Vec<WatchedEntry>>>(&content) {
            Ok(entries) => {
                info!(
                    path = %self.path.display(),
                    entries = entries.as_ref().map_or(0, Vec::len),
                    "Loaded watched list"
                );
                Ok(entries)
            }
            Err(e) => {
                // Keep the unreadable file around and start fresh
                let backup_path = self.path.with_extension("json.bak");
                if let Err(backup_err) = std::fs::copy(&self.path, &backup_path) {
                    warn!(
                        "Watched list is corrupt ({}) and could not be backed up: {}. Starting with an empty list.",
                        e, backup_err
                    );
                } else {
                    warn!(
                        "Watched list is corrupt ({}). Backed up to {:?} and starting with an empty list.",
                        e, backup_path
                    );
                }
                Ok(None)
            }
        }
    }

    fn save(&mut self, entries: &[WatchedEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let serialized = serde_json::to_string_pretty(entries)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, serialized)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), entries = entries.len(), "Saved watched list");
        Ok(())
    }
}

/// In-memory slot; counts writes so callers can observe persistence
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    saved: Option<Vec<WatchedEntry>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<WatchedEntry>) -> Self {
        Self {
            saved: Some(entries),
            writes: 0,
        }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn saved(&self) -> Option<&[WatchedEntry]> {
        self.saved.as_deref()
    }
}

impl WatchedStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<WatchedEntry>>, StoreError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, entries: &[WatchedEntry]) -> Result<(), StoreError> {
        self.saved = Some(entries.to_vec());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> WatchedEntry {
        WatchedEntry {
            catalog_id: id.to_string(),
            title: format!("Movie {}", id),
            year: "2001".to_string(),
            poster_url: None,
            imdb_rating: Some(7.0),
            runtime_minutes: Some(100),
            user_rating: 8,
            added_at: None,
        }
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("watched.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("data").join("watched.json"));

        store.save(&[entry("tt1"), entry("tt2")]).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].catalog_id, "tt2");
        assert!(!dir.path().join("data").join("watched.json.tmp").exists());
    }

    #[test]
    fn test_null_slot_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.json");
        std::fs::write(&path, "null").unwrap();
        assert!(JsonFileStore::new(path).load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().unwrap().is_none());
        assert!(dir.path().join("watched.json.bak").exists());
    }

    #[test]
    fn test_invalid_utf8_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.json");
        let bytes = b"[{\"imdbId\":\"tt1\",\"title\":\"Caf\xE9\"}]".to_vec();
        std::fs::write(&path, &bytes).unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.load().unwrap().is_none());

        let backup = dir.path().join("watched.json.bak");
        assert_eq!(std::fs::read(&backup).unwrap(), bytes);

        // Overwriting the slot leaves the backup intact
        store.save(&[entry("tt2")]).unwrap();
        assert_eq!(std::fs::read(&backup).unwrap(), bytes);
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&[entry("tt1")]).unwrap();
        store.save(&[]).unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.saved().unwrap().len(), 0);
    }
}
