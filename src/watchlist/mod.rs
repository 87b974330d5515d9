//! The user's watched list.
//!
//! # Organization
//!
//! - [`store`]: Ordered, write-through persisted collection of rated titles
//! - [`summary`]: Aggregate statistics shown above the list

pub mod store;
pub mod summary;

pub use store::{StorageSettings, WatchlistStore, DEFAULT_STORAGE_KEY, UNSAVED_NOTICE};
pub use summary::WatchSummary;
