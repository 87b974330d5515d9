//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait: a string-keyed,
//! string-valued store with the same contract as a browser's local storage.
//! The watchlist keeps its whole collection under a single key.
//!
//! # Design Philosophy
//!
//! The trait is minimal. Values are opaque strings, serialization belongs to
//! the caller, and every `set` is durable by the time it returns.

use crate::domain::error::Result;

/// Abstraction over durable key-value backends.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): JSON file with atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): process memory, used when no
///   file is available and in tests
///
/// # Examples
///
/// ```no_run
/// use popcorn::storage::{JsonFileStore, KeyValueStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonFileStore::open(PathBuf::from("/tmp/popcorn.json"))?;
/// store.set("watchedMovies", "[]".to_string())?;
/// assert_eq!(store.get("watchedMovies")?.as_deref(), Some("[]"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// Short backend name for logs.
    fn describe(&self) -> String;
}
