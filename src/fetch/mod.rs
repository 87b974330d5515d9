//! Cancellable catalog fetches.
//!
//! Zellij's `web_request` cannot be aborted once sent, so cancellation is
//! cooperative: each logical slot hands out a fresh [`RequestToken`] per
//! request and only the slot's active token may change state when a
//! `WebRequestResult` arrives. Superseded and cancelled responses are dropped
//! silently, including their errors.
//!
//! # Organization
//!
//! - [`token`]: Slots, tokens and the context map that carries them
//! - [`search`]: Title search with minimum query length
//! - [`detail`]: Lazy detail lookup for the selected title

pub mod detail;
pub mod search;
pub mod token;

pub use detail::{DetailFetcher, DetailState};
pub use search::{is_searchable, SearchFetcher, SearchStatus, MIN_QUERY_LEN};
pub use token::{PendingRequest, RequestSlot, RequestTag, RequestToken, SlotKind};
