//! Selection state and the rating draft of the open detail.

use crate::domain::{MAX_USER_RATING, MIN_USER_RATING};

/// In-progress rating of the open detail.
///
/// `adjustments` counts every change to a different value. It becomes the
/// watched entry's rating event count when the draft is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingDraft {
    value: Option<u8>,
    adjustments: u32,
}

impl RatingDraft {
    #[must_use]
    pub const fn value(&self) -> Option<u8> {
        self.value
    }

    #[must_use]
    pub const fn adjustments(&self) -> u32 {
        self.adjustments
    }

    /// Sets the rating, clamped to the user scale.
    ///
    /// Returns whether the value changed.
    pub fn set(&mut self, rating: u8) -> bool {
        let rating = rating.clamp(MIN_USER_RATING, MAX_USER_RATING);
        if self.value == Some(rating) {
            return false;
        }
        self.value = Some(rating);
        self.adjustments += 1;
        true
    }

    /// Moves the rating by `delta`, starting from `baseline` when nothing has
    /// been set yet.
    pub fn step(&mut self, delta: i8, baseline: Option<u8>) -> bool {
        let current = self.value.or(baseline);
        let next = match current {
            Some(v) => i16::from(v) + i16::from(delta),
            None if delta > 0 => i16::from(MIN_USER_RATING),
            None => i16::from(MAX_USER_RATING),
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let next = next.clamp(i16::from(MIN_USER_RATING), i16::from(MAX_USER_RATING)) as u8;
        self.set(next)
    }
}

/// Which title, if any, has its detail open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Detail {
        id: String,
        draft: RatingDraft,
    },
}

impl Selection {
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Detail { id, .. } => Some(id),
        }
    }

    #[must_use]
    pub const fn draft(&self) -> Option<&RatingDraft> {
        match self {
            Self::Idle => None,
            Self::Detail { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut RatingDraft> {
        match self {
            Self::Idle => None,
            Self::Detail { draft, .. } => Some(draft),
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Detail { .. })
    }
}
