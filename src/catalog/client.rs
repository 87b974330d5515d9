//! Catalog endpoint configuration and request URLs.

use crate::domain::CatalogError;

/// Public OMDb endpoint used when no `api_url` is configured.
pub const DEFAULT_API_URL: &str = "https://www.omdbapi.com/";

/// Builds catalog request URLs.
///
/// Holds no connection state. A client without an API key still exists so the
/// plugin can start and report [`CatalogError::MissingApiKey`] inline instead
/// of failing to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogClient {
    api_url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    /// Creates a client for `api_url`. Blank keys count as missing.
    #[must_use]
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Whether requests can be built at all.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// URL of a title search: `{api_url}?apikey={key}&s={query}`.
    ///
    /// The query is sent as typed apart from URL encoding; callers enforce
    /// the minimum length.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingApiKey`] if no key is configured.
    pub fn search_url(&self, query: &str) -> Result<String, CatalogError> {
        self.build_url("s", query)
    }

    /// URL of a detail lookup by id: `{api_url}?apikey={key}&i={id}`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingApiKey`] if no key is configured.
    pub fn detail_url(&self, id: &str) -> Result<String, CatalogError> {
        self.build_url("i", id)
    }

    fn build_url(&self, param: &str, value: &str) -> Result<String, CatalogError> {
        let key = self.api_key.as_deref().ok_or(CatalogError::MissingApiKey)?;
        let separator = if self.api_url.contains('?') { '&' } else { '?' };

        Ok(format!(
            "{}{separator}apikey={}&{param}={}",
            self.api_url,
            urlencoding::encode(key),
            urlencoding::encode(value)
        ))
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query() {
        let client = CatalogClient::new(DEFAULT_API_URL, Some("abc123".to_string()));
        let url = client.search_url("the dark knight").unwrap();

        assert_eq!(url, "https://www.omdbapi.com/?apikey=abc123&s=the%20dark%20knight");
    }

    #[test]
    fn detail_url_uses_id_parameter() {
        let client = CatalogClient::new(DEFAULT_API_URL, Some("abc123".to_string()));

        assert_eq!(
            client.detail_url("tt1375666").unwrap(),
            "https://www.omdbapi.com/?apikey=abc123&i=tt1375666"
        );
    }

    #[test]
    fn existing_query_string_is_extended() {
        let client = CatalogClient::new("http://localhost:8080/?type=movie", Some("k".to_string()));

        assert_eq!(
            client.search_url("heat").unwrap(),
            "http://localhost:8080/?type=movie&apikey=k&s=heat"
        );
    }

    #[test]
    fn blank_key_is_missing() {
        let client = CatalogClient::new(DEFAULT_API_URL, Some("  ".to_string()));

        assert!(!client.has_api_key());
        assert_eq!(client.search_url("inception"), Err(CatalogError::MissingApiKey));
    }
}
