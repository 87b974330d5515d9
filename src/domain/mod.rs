//! Domain layer for the popcorn plugin.
//!
//! Core types independent of Zellij APIs and of the storage or catalog wire
//! formats.
//!
//! # Organization
//!
//! - [`error`]: Error types, user-facing messages and result alias
//! - [`movie`]: Search rows, title details and watched entries

pub mod error;
pub mod movie;

pub use error::{CatalogError, PopcornError, Result};
pub use movie::{ItemDetail, SearchResultItem, WatchedEntry, MAX_USER_RATING, MIN_USER_RATING};
