//! Path utilities for the Zellij sandbox.

use std::path::PathBuf;

/// File name of the key-value storage inside the data directory.
const STORAGE_FILE: &str = "storage.json";

/// Returns the plugin data directory, `/host/.local/share/zellij/popcorn`.
///
/// `/host` is the cwd of the last focused terminal, or the directory Zellij
/// was started from. From a home directory this resolves to
/// `~/.local/share/zellij/popcorn` on the host.
///
/// # Examples
///
/// ```
/// use popcorn::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/popcorn"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("popcorn")
}

/// Default location of the watchlist storage file.
#[must_use]
pub fn default_storage_path() -> PathBuf {
    get_data_dir().join(STORAGE_FILE)
}

/// Maps `~` to the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use popcorn::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/movies.json"), "/host/movies.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Removes the `/host` prefix so paths read as they do on the host.
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix("/host").unwrap_or(path).to_string()
}
