//! Detail fetcher for the selected title.

use crate::catalog::{parse_detail, CatalogClient};
use crate::domain::{CatalogError, ItemDetail};
use crate::fetch::token::{PendingRequest, RequestSlot, RequestTag, SlotKind};

/// Lifecycle of the open detail.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(ItemDetail),
    Failed(CatalogError),
}

/// Fetches and holds the detail of at most one title.
#[derive(Debug, Clone)]
pub struct DetailFetcher {
    slot: RequestSlot,
    id: Option<String>,
    state: Option<DetailState>,
}

impl Default for DetailFetcher {
    fn default() -> Self {
        Self {
            slot: RequestSlot::new(SlotKind::Detail),
            id: None,
            state: None,
        }
    }
}

impl DetailFetcher {
    /// Starts loading the detail of `id`, discarding the previous one.
    pub fn open(&mut self, id: &str, catalog: &CatalogClient) -> Option<PendingRequest> {
        let _span = tracing::debug_span!("detail_open", id = %id).entered();

        self.slot.cancel();
        self.id = Some(id.to_string());

        match catalog.detail_url(id) {
            Ok(url) => {
                let tag = self.slot.begin();
                self.state = Some(DetailState::Loading);
                Some(PendingRequest { tag, url })
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot build detail request");
                self.state = Some(DetailState::Failed(err));
                None
            }
        }
    }

    /// Applies a detail response. Returns `false` for stale tags.
    pub fn complete(&mut self, tag: &RequestTag, status: u16, body: &[u8]) -> bool {
        if !self.slot.settle(tag) {
            return false;
        }

        let state = match parse_detail(status, body) {
            Ok(detail) => {
                tracing::debug!(id = %detail.id, title = %detail.title, "detail loaded");
                DetailState::Loaded(detail)
            }
            Err(err) => {
                tracing::debug!(error = %err, "detail failed");
                DetailState::Failed(err)
            }
        };
        self.state = Some(state);
        true
    }

    /// Cancels any in-flight lookup and forgets the detail.
    pub fn close(&mut self) {
        self.slot.cancel();
        self.id = None;
        self.state = None;
    }

    #[must_use]
    pub fn current_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub const fn state(&self) -> Option<&DetailState> {
        self.state.as_ref()
    }

    /// The loaded detail, if the lookup succeeded.
    #[must_use]
    pub const fn detail(&self) -> Option<&ItemDetail> {
        match &self.state {
            Some(DetailState::Loaded(detail)) => Some(detail),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, Some(DetailState::Loading))
    }

    #[must_use]
    pub const fn error_message(&self) -> Option<&'static str> {
        match &self.state {
            Some(DetailState::Failed(err)) => Some(err.detail_message()),
            _ => None,
        }
    }
}
