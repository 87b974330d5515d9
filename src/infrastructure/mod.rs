//! Infrastructure layer for filesystem and environment interactions.
//!
//! Zellij plugins run in a WASI sandbox where the host filesystem is mounted
//! under `/host`. Everything here translates between user-facing paths and
//! sandbox paths.

pub mod paths;

pub use paths::{default_storage_path, expand_tilde, get_data_dir, strip_host_prefix};
