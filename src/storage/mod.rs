//! Storage layer for persistent plugin data.
//!
//! A string-keyed store with local-storage semantics. The watchlist is its
//! only user today and keeps the whole collection under one key.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `memory`: Volatile fallback used when no file is available

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
