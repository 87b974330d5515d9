//! Request slots and generation tokens.

use std::collections::BTreeMap;

const CONTEXT_SLOT: &str = "slot";
const CONTEXT_TOKEN: &str = "token";

/// Logical request slot. At most one request per slot is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Search,
    Detail,
}

impl SlotKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Detail => "detail",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "search" => Some(Self::Search),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

/// Generation number of one request within its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Identifies a request across the round trip through the Zellij runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub slot: SlotKind,
    pub token: RequestToken,
}

impl RequestTag {
    /// Encodes the tag as a `web_request` context map.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_SLOT.to_string(), self.slot.as_str().to_string()),
            (CONTEXT_TOKEN.to_string(), self.token.0.to_string()),
        ])
    }

    /// Decodes a tag from the context map of a `WebRequestResult`.
    ///
    /// Returns `None` for results this plugin did not tag.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let slot = SlotKind::parse(context.get(CONTEXT_SLOT)?)?;
        let token = context.get(CONTEXT_TOKEN)?.parse().ok()?;
        Some(Self {
            slot,
            token: RequestToken(token),
        })
    }
}

/// A request the shim must hand to `web_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub tag: RequestTag,
    pub url: String,
}

/// Hands out tokens for one slot and remembers which one is active.
#[derive(Debug, Clone)]
pub struct RequestSlot {
    kind: SlotKind,
    next: u64,
    active: Option<RequestToken>,
}

impl RequestSlot {
    #[must_use]
    pub const fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            next: 0,
            active: None,
        }
    }

    /// Starts a new request, superseding any active one.
    pub fn begin(&mut self) -> RequestTag {
        if let Some(previous) = self.active {
            tracing::debug!(slot = self.kind.as_str(), token = previous.0, "superseding request");
        }
        self.next += 1;
        let token = RequestToken(self.next);
        self.active = Some(token);
        RequestTag {
            slot: self.kind,
            token,
        }
    }

    /// Cancels the active request. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Accepts a completion if `tag` is the active request, clearing it.
    ///
    /// Returns `false` for stale or foreign tags; the caller must discard the
    /// result.
    pub fn settle(&mut self, tag: &RequestTag) -> bool {
        if tag.slot == self.kind && self.active == Some(tag.token) {
            self.active = None;
            true
        } else {
            tracing::debug!(slot = self.kind.as_str(), token = tag.token.0, "discarding stale response");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_supersedes_previous_token() {
        let mut slot = RequestSlot::new(SlotKind::Search);
        let first = slot.begin();
        let second = slot.begin();

        assert!(!slot.settle(&first));
        assert!(slot.settle(&second));
        assert!(!slot.cancel());
    }

    #[test]
    fn cancelled_request_never_settles() {
        let mut slot = RequestSlot::new(SlotKind::Detail);
        let tag = slot.begin();

        assert!(slot.cancel());
        assert!(!slot.cancel());
        assert!(!slot.settle(&tag));
    }

    #[test]
    fn tag_from_other_slot_is_rejected() {
        let mut search = RequestSlot::new(SlotKind::Search);
        let mut detail = RequestSlot::new(SlotKind::Detail);
        let search_tag = search.begin();
        detail.begin();

        assert!(!detail.settle(&search_tag));
        assert!(detail.cancel());
    }

    #[test]
    fn context_round_trips_and_rejects_foreign_maps() {
        let mut slot = RequestSlot::new(SlotKind::Detail);
        let tag = slot.begin();

        assert_eq!(RequestTag::from_context(&tag.to_context()), Some(tag));
        assert_eq!(RequestTag::from_context(&BTreeMap::new()), None);

        let foreign = BTreeMap::from([("slot".to_string(), "weather".to_string()), ("token".to_string(), "1".to_string())]);
        assert_eq!(RequestTag::from_context(&foreign), None);
    }
}
