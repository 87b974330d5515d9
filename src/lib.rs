//! Popcorn: a Zellij plugin to search a movie catalog and keep a rated
//! watchlist.
//!
//! - Debounced search against an OMDb-compatible HTTP API
//! - Detail view with a 10-star rating widget
//! - Watchlist with summary statistics, persisted as JSON
//! - Stale responses dropped through per-slot request tokens

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web_request, timers
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling and key bindings                  │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Fetch Layer   │   │ Watchlist     │   │ UI Layer      │
//! │ (fetch/)      │   │ (watchlist/)  │   │ (ui/)         │
//! │ - Slots       │   │ - Entries     │   │ - Rendering   │
//! │ - Tokens      │   │ - Summary     │   │ - Theming     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Storage       │
//! │ (catalog/)    │   │ (storage/)    │
//! │ - URLs, JSON  │   │ - Key-value   │
//! └───────────────┘   └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: Catalog request URLs and response decoding
//! - [`fetch`]: Search and detail request slots with cancellation
//! - [`watchlist`]: Watched entries, persistence hook and summary
//! - [`storage`]: Key-value persistence backends
//! - [`domain`]: Core types and errors
//! - [`infrastructure`]: Sandbox paths
//! - [`ui`]: Terminal rendering with theme support
//! - `observability`: Span export to a JSON-lines file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/popcorn.wasm" {
//!         api_key "your-omdb-key"
//!         debounce_ms "300"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Usage (library)
//!
//! ```rust
//! use popcorn::{handle_event, initialize, Config, Event};
//!
//! let config = Config { api_key: Some("key".to_string()), debounce_ms: 0, ..Default::default() };
//! let mut state = initialize(&config);
//!
//! for c in "inception".chars() {
//!     let (_render, actions) = handle_event(&mut state, &Event::Char(c))?;
//!     // The shim turns `Action::IssueRequest` into `web_request(..)`.
//!     let _ = actions;
//! }
//! assert!(state.search.is_loading());
//! # Ok::<(), popcorn::PopcornError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod storage;
pub mod ui;
pub mod watchlist;

pub mod observability;

pub use app::{handle_event, Action, AppSettings, AppState, Event, InputMode, NamedKey, Pane};
pub use catalog::CatalogClient;
pub use domain::{CatalogError, ItemDetail, PopcornError, Result, SearchResultItem, WatchedEntry};
pub use fetch::RequestTag;
pub use ui::Theme;
pub use watchlist::{StorageSettings, DEFAULT_STORAGE_KEY};

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default delay between the last keystroke and the search request.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/popcorn.wasm" {
///     api_key "your-omdb-key"
///     api_url "https://www.omdbapi.com/"
///     storage_path "~/.local/share/zellij/popcorn/storage.json"
///     storage_key "watchedMovies"
///     debounce_ms "300"
///     theme "popcorn"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog API key. Without one, searches show an inline error.
    pub api_key: Option<String>,

    /// Catalog endpoint. Default: [`catalog::DEFAULT_API_URL`]
    pub api_url: String,

    /// Storage file, in sandbox terms (`~` maps to `/host`).
    ///
    /// Default: `/host/.local/share/zellij/popcorn/storage.json`
    pub storage_path: PathBuf,

    /// Key the watchlist is stored under. Default: `watchedMovies`
    pub storage_key: String,

    /// Search debounce in milliseconds. `0` searches on every keystroke.
    pub debounce_ms: u64,

    /// Built-in theme name, see [`ui::BUILTIN_THEMES`]. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: catalog::DEFAULT_API_URL.to_string(),
            storage_path: infrastructure::default_storage_path(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or blank values fall back to the defaults. Invalid values are
    /// logged and fall back too.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use popcorn::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc123".to_string());
    /// map.insert("debounce_ms".to_string(), "0".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abc123"));
    /// assert_eq!(config.debounce_ms, 0);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            api_key: value("api_key"),
            api_url: match value("api_url") {
                Some(raw) => or_default(parse_api_url(&raw), defaults.api_url),
                None => defaults.api_url,
            },
            storage_path: value("storage_path")
                .map_or(defaults.storage_path, |p| PathBuf::from(infrastructure::expand_tilde(&p))),
            storage_key: value("storage_key").unwrap_or(defaults.storage_key),
            debounce_ms: match value("debounce_ms") {
                Some(raw) => or_default(parse_debounce_ms(&raw), defaults.debounce_ms),
                None => defaults.debounce_ms,
            },
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }

    /// Runtime settings derived from this configuration.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            catalog: CatalogClient::new(self.api_url.clone(), self.api_key.clone()),
            debounce_ms: self.debounce_ms,
            storage: StorageSettings {
                path: self.storage_path.clone(),
                key: self.storage_key.clone(),
            },
        }
    }

    /// Theme from `theme_file`, else `theme`, else the default.
    ///
    /// A theme that fails to load is logged and replaced by the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Longest accepted search debounce.
const MAX_DEBOUNCE_MS: u64 = 10_000;

fn parse_debounce_ms(raw: &str) -> Result<u64> {
    let ms: u64 = raw
        .parse()
        .map_err(|e| PopcornError::Config(format!("debounce_ms {raw:?}: {e}")))?;
    if ms > MAX_DEBOUNCE_MS {
        return Err(PopcornError::Config(format!("debounce_ms {ms} exceeds {MAX_DEBOUNCE_MS}")));
    }
    Ok(ms)
}

fn parse_api_url(raw: &str) -> Result<String> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Ok(raw.to_string())
    } else {
        Err(PopcornError::Config(format!("api_url {raw:?} is not an http(s) URL")))
    }
}

fn or_default<T>(parsed: Result<T>, default: T) -> T {
    parsed.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid plugin option, using default");
        default
    })
}

/// Creates the application state for `config`.
///
/// The watchlist starts in memory; the shim attaches file storage once the
/// filesystem permission is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        api_url = %config.api_url,
        has_api_key = config.api_key.is_some(),
        debounce_ms = config.debounce_ms,
        "initializing popcorn plugin"
    );

    AppState::new(config.app_settings(), config.load_theme())
}
