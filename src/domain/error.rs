//! Error types for the popcorn plugin.
//!
//! This module defines the crate-wide error type [`PopcornError`], the catalog
//! error taxonomy [`CatalogError`], and a [`Result`] alias. All errors are
//! implemented with `thiserror`.

use thiserror::Error;

/// Message shown when a search request fails at the transport or HTTP level.
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong with getting movies";

/// Message shown when a detail request fails at the transport or HTTP level.
pub const DETAIL_FAILED_MESSAGE: &str = "Something went wrong with getting movie details";

/// Message shown when the catalog answers but has no match.
pub const NOT_FOUND_MESSAGE: &str = "Movie not found!";

/// Message shown when no API key was configured.
pub const MISSING_KEY_MESSAGE: &str = "No catalog API key configured";

/// Failure modes of a catalog lookup.
///
/// Cancelled requests are deliberately absent: a superseded response is not an
/// error, it is dropped by the request slot before it is ever parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog answered with a non-success HTTP status.
    #[error("catalog returned HTTP {status}")]
    NetworkFailure {
        /// HTTP status code reported by the runtime.
        status: u16,
    },

    /// The catalog answered `Response: "False"` or without a result collection.
    #[error("no matching title in catalog")]
    NotFound,

    /// The response body could not be decoded.
    #[error("malformed catalog response: {0}")]
    Malformed(String),

    /// No API key is configured, so no request can be built.
    #[error("catalog API key is not configured")]
    MissingApiKey,
}

impl CatalogError {
    /// User-facing message for a failed search.
    #[must_use]
    pub const fn search_message(&self) -> &'static str {
        match self {
            Self::NetworkFailure { .. } | Self::Malformed(_) => SEARCH_FAILED_MESSAGE,
            Self::NotFound => NOT_FOUND_MESSAGE,
            Self::MissingApiKey => MISSING_KEY_MESSAGE,
        }
    }

    /// User-facing message for a failed detail lookup.
    #[must_use]
    pub const fn detail_message(&self) -> &'static str {
        match self {
            Self::NetworkFailure { .. } | Self::Malformed(_) => DETAIL_FAILED_MESSAGE,
            Self::NotFound => NOT_FOUND_MESSAGE,
            Self::MissingApiKey => MISSING_KEY_MESSAGE,
        }
    }
}

/// The main error type for popcorn operations.
///
/// Consolidates storage, I/O, theme, configuration, and catalog failures.
/// None of these are fatal to the plugin; callers log them and degrade.
#[derive(Debug, Error)]
pub enum PopcornError {
    /// Reading or writing the key-value storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// A specialized `Result` type for popcorn operations.
pub type Result<T> = std::result::Result<T, PopcornError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_and_detail_messages_differ_only_for_transport_failures() {
        let failure = CatalogError::NetworkFailure { status: 500 };
        assert_eq!(failure.search_message(), SEARCH_FAILED_MESSAGE);
        assert_eq!(failure.detail_message(), DETAIL_FAILED_MESSAGE);

        assert_eq!(CatalogError::NotFound.search_message(), NOT_FOUND_MESSAGE);
        assert_eq!(CatalogError::NotFound.detail_message(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn catalog_errors_convert_into_crate_error() {
        let err: PopcornError = CatalogError::MissingApiKey.into();
        assert!(matches!(err, PopcornError::Catalog(CatalogError::MissingApiKey)));
        assert!(err.to_string().contains("API key"));
    }
}
