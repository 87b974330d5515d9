//! Title search fetcher.

use crate::catalog::{parse_search, CatalogClient};
use crate::domain::{CatalogError, SearchResultItem};
use crate::fetch::token::{PendingRequest, RequestSlot, RequestTag, SlotKind};

/// Queries shorter than this many characters (after trimming) never hit the
/// catalog.
pub const MIN_QUERY_LEN: usize = 3;

/// Observable status of the search slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No search has run for the current query.
    #[default]
    Idle,
    Loading,
    /// The last search succeeded; results may still be empty.
    Loaded,
    Failed(CatalogError),
}

/// Turns queries into catalog searches and owns the result set.
#[derive(Debug, Clone)]
pub struct SearchFetcher {
    slot: RequestSlot,
    status: SearchStatus,
    results: Vec<SearchResultItem>,
}

impl Default for SearchFetcher {
    fn default() -> Self {
        Self {
            slot: RequestSlot::new(SlotKind::Search),
            status: SearchStatus::Idle,
            results: Vec::new(),
        }
    }
}

/// Whether `query` is long enough to search for.
#[must_use]
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_LEN
}

impl SearchFetcher {
    /// Starts a search for `query`, superseding any in-flight search.
    ///
    /// # Returns
    ///
    /// The request to send, or `None` when the query is too short (results
    /// and error are cleared) or no API key is configured (the error is
    /// recorded).
    pub fn submit(&mut self, query: &str, catalog: &CatalogClient) -> Option<PendingRequest> {
        let _span = tracing::debug_span!("search_submit", query = %query).entered();

        self.slot.cancel();

        if !is_searchable(query) {
            self.results.clear();
            self.status = SearchStatus::Idle;
            return None;
        }

        match catalog.search_url(query) {
            Ok(url) => {
                let tag = self.slot.begin();
                self.status = SearchStatus::Loading;
                tracing::debug!(token = tag.token.value(), "search request issued");
                Some(PendingRequest { tag, url })
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot build search request");
                self.results.clear();
                self.status = SearchStatus::Failed(err);
                None
            }
        }
    }

    /// Applies a search response.
    ///
    /// Returns `false` when `tag` is stale; nothing changes in that case.
    pub fn complete(&mut self, tag: &RequestTag, status: u16, body: &[u8]) -> bool {
        if !self.slot.settle(tag) {
            return false;
        }

        match parse_search(status, body) {
            Ok(items) => {
                tracing::debug!(count = items.len(), "search results loaded");
                self.results = items;
                self.status = SearchStatus::Loaded;
            }
            Err(err) => {
                tracing::debug!(error = %err, "search failed");
                self.results.clear();
                self.status = SearchStatus::Failed(err);
            }
        }
        true
    }

    /// Abandons the in-flight search, if any. Results are kept.
    pub fn cancel(&mut self) {
        if self.slot.cancel() && self.status == SearchStatus::Loading {
            self.status = SearchStatus::Idle;
        }
    }

    /// Drops results and error along with any in-flight search.
    pub fn clear(&mut self) {
        self.slot.cancel();
        self.results.clear();
        self.status = SearchStatus::Idle;
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    #[must_use]
    pub const fn status(&self) -> &SearchStatus {
        &self.status
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    /// User-facing error message of the last search, if it failed.
    #[must_use]
    pub const fn error_message(&self) -> Option<&'static str> {
        match &self.status {
            SearchStatus::Failed(err) => Some(err.search_message()),
            _ => None,
        }
    }
}
