//! Persisted watchlist collection.
//!
//! The full list is serialized to one storage key on every mutation. Loading
//! happens once, when storage becomes available; anything unreadable under
//! the key is treated as an empty list.

use crate::domain::error::{PopcornError, Result};
use crate::domain::WatchedEntry;
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::watchlist::summary::WatchSummary;
use std::path::PathBuf;

/// Storage key of the watched list.
pub const DEFAULT_STORAGE_KEY: &str = "watchedMovies";

/// Notice shown when the list cannot be saved to disk.
pub const UNSAVED_NOTICE: &str = "Watchlist storage unavailable, changes will not be saved";

/// Where the watchlist is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub path: PathBuf,
    pub key: String,
}

/// Ordered collection of watched titles, at most one entry per id.
pub struct WatchlistStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    entries: Vec<WatchedEntry>,
}

impl std::fmt::Debug for WatchlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchlistStore")
            .field("backend", &self.backend.describe())
            .field("key", &self.key)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl WatchlistStore {
    /// Opens the file-backed watchlist described by `settings`.
    ///
    /// Falls back to an in-memory list when the file cannot be opened; the
    /// second value is then a notice for the user.
    #[must_use]
    pub fn open(settings: &StorageSettings) -> (Self, Option<&'static str>) {
        match JsonFileStore::open(settings.path.clone()) {
            Ok(backend) => (Self::load(Box::new(backend), settings.key.clone()), None),
            Err(e) => {
                tracing::warn!(path = ?settings.path, error = %e, "storage unavailable, using memory");
                (Self::in_memory(settings.key.clone()), Some(UNSAVED_NOTICE))
            }
        }
    }

    /// An empty list that is never written to disk.
    #[must_use]
    pub fn in_memory(key: impl Into<String>) -> Self {
        Self::load(Box::new(MemoryStore::new()), key)
    }

    /// Loads the list stored under `key`.
    ///
    /// Never fails: a read error, a missing key, `null` or corrupt JSON all
    /// start an empty list.
    pub fn load(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let _span = tracing::debug_span!("watchlist_load", key = %key, backend = %backend.describe()).entered();

        let entries = match backend.get(&key) {
            Ok(Some(raw)) => Self::decode(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read watchlist, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = entries.len(), "watchlist loaded");
        Self { backend, key, entries }
    }

    fn decode(raw: &str) -> Vec<WatchedEntry> {
        match serde_json::from_str::<Option<Vec<WatchedEntry>>>(raw) {
            Ok(Some(mut entries)) => {
                let mut seen = std::collections::HashSet::new();
                // keep the last occurrence of a duplicated id
                entries.reverse();
                entries.retain(|e| seen.insert(e.id.clone()));
                entries.reverse();
                entries
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "stored watchlist is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| PopcornError::Storage(format!("failed to serialize watchlist: {e}")))?;
        self.backend.set(&self.key, json).inspect_err(|e| {
            tracing::warn!(error = %e, "failed to persist watchlist");
        })
    }

    /// Adds `entry`, replacing any entry with the same id.
    ///
    /// The entry always ends up last.
    ///
    /// # Errors
    ///
    /// Returns an error if the list could not be written. The in-memory list
    /// is updated regardless.
    pub fn add(&mut self, entry: WatchedEntry) -> Result<()> {
        let _span = tracing::debug_span!("watchlist_add", id = %entry.id, rating = entry.user_rating).entered();

        self.entries.retain(|e| e.id != entry.id);
        self.entries.push(entry);
        self.persist()
    }

    /// Removes the entry with `id`.
    ///
    /// Returns whether an entry was removed. Removing an unknown id does not
    /// touch storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the list could not be written.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);

        if self.entries.len() == before {
            return Ok(false);
        }

        tracing::debug!(id = %id, "removed from watchlist");
        self.persist()?;
        Ok(true)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> WatchSummary {
        WatchSummary::compute(&self.entries)
    }

    /// Backend description for logs and the footer.
    #[must_use]
    pub fn backend_name(&self) -> String {
        self.backend.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, user_rating: u8) -> WatchedEntry {
        WatchedEntry {
            id: id.to_string(),
            title: format!("Title {id}"),
            year: "2010".to_string(),
            poster_url: None,
            catalog_rating: Some(8.0),
            runtime_minutes: Some(120),
            user_rating,
            rating_event_count: 1,
        }
    }

    /// Backend whose writes always fail, like a full or read-only disk.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<()> {
            Err(PopcornError::Storage("read-only".to_string()))
        }

        fn describe(&self) -> String {
            "read-only".to_string()
        }
    }

    fn store_holding(raw: &str) -> WatchlistStore {
        let mut backend = MemoryStore::new();
        backend.set(DEFAULT_STORAGE_KEY, raw.to_string()).unwrap();
        WatchlistStore::load(Box::new(backend), DEFAULT_STORAGE_KEY)
    }

    fn empty_store() -> WatchlistStore {
        WatchlistStore::load(Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn adding_same_id_replaces_and_moves_to_end() {
        let mut store = empty_store();
        store.add(entry("a", 5)).unwrap();
        store.add(entry("b", 6)).unwrap();
        store.add(entry("a", 10)).unwrap();

        let ids: Vec<_> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(store.get("a").map(|e| e.user_rating), Some(10));
    }

    #[test]
    fn removing_unknown_id_is_a_quiet_no_op() {
        let mut store = WatchlistStore::load(Box::new(ReadOnlyStore), DEFAULT_STORAGE_KEY);

        assert!(!store.remove("missing").unwrap());
    }

    #[test]
    fn failed_write_keeps_in_memory_change() {
        let mut store = WatchlistStore::load(Box::new(ReadOnlyStore), DEFAULT_STORAGE_KEY);

        assert!(store.add(entry("a", 7)).is_err());
        assert!(store.contains("a"));
    }

    #[test]
    fn null_and_corrupt_values_load_empty() {
        for raw in ["null", "{broken", "42"] {
            let store = store_holding(raw);
            assert!(store.is_empty(), "{raw} should load empty");
        }
    }

    #[test]
    fn duplicated_ids_in_storage_collapse_to_last() {
        let raw = serde_json::to_string(&[entry("a", 3), entry("b", 4), entry("a", 9)]).unwrap();
        let store = store_holding(&raw);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").map(|e| e.user_rating), Some(9));
    }

    #[test]
    fn open_falls_back_to_memory_when_file_is_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let settings = StorageSettings { path, key: DEFAULT_STORAGE_KEY.to_string() };
        let (store, notice) = WatchlistStore::open(&settings);

        assert_eq!(notice, Some(UNSAVED_NOTICE));
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn list_survives_restart_through_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = WatchlistStore::load(Box::new(JsonFileStore::open(path.clone()).unwrap()), DEFAULT_STORAGE_KEY);
        store.add(entry("tt1375666", 10)).unwrap();
        store.add(entry("tt0088763", 8)).unwrap();
        store.remove("tt0088763").unwrap();
        drop(store);

        let reloaded = WatchlistStore::load(Box::new(JsonFileStore::open(path).unwrap()), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.entries(), &[entry("tt1375666", 10)]);
    }
}
