//! Movie domain models.
//!
//! Three shapes flow through the plugin: [`SearchResultItem`] rows returned by
//! a catalog search, the lazily fetched [`ItemDetail`] of a selected row, and
//! the user-rated [`WatchedEntry`] kept in the watchlist.

use serde::{Deserialize, Serialize};

/// Lowest rating a user can give.
pub const MIN_USER_RATING: u8 = 1;

/// Highest rating a user can give.
pub const MAX_USER_RATING: u8 = 10;

/// One row of a catalog search result.
///
/// Immutable. The whole set is replaced whenever a newer query succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Catalog identifier (IMDb id), unique within a result set.
    pub id: String,
    pub title: String,
    /// Release year as reported by the catalog ("2010", "2008–2013").
    pub year: String,
    pub poster_url: Option<String>,
}

/// Full description of a single catalog title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    /// Runtime in minutes, `None` when the catalog reports `N/A`.
    pub runtime_minutes: Option<u32>,
    /// Catalog rating on a 0-10 scale, `None` when unrated.
    pub catalog_rating: Option<f64>,
    pub plot: String,
    pub release_date: String,
    pub cast: String,
    pub director: String,
    pub genre: String,
}

impl ItemDetail {
    /// Catalog rating rounded to the nearest whole star, clamped to the user scale.
    ///
    /// Used as the display baseline for a fresh rating draft.
    #[must_use]
    pub fn rounded_catalog_rating(&self) -> Option<u8> {
        self.catalog_rating.map(|rating| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let rounded = rating.round().clamp(0.0, f64::from(MAX_USER_RATING)) as u8;
            rounded.max(MIN_USER_RATING)
        })
    }
}

/// A title the user has watched and rated.
///
/// Serialized with the field names used by the persisted watchlist so existing
/// data keeps loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub id: String,
    pub title: String,
    pub year: String,
    #[serde(rename = "poster", default)]
    pub poster_url: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub catalog_rating: Option<f64>,
    #[serde(rename = "runtime", default)]
    pub runtime_minutes: Option<u32>,
    #[serde(rename = "userRating")]
    pub user_rating: u8,
    /// How many times the rating was changed before it was confirmed.
    #[serde(rename = "userRatingCount", default)]
    pub rating_event_count: u32,
}

impl WatchedEntry {
    /// Builds a watched entry from a loaded detail and the confirmed rating.
    #[must_use]
    pub fn from_detail(detail: &ItemDetail, user_rating: u8, rating_event_count: u32) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            catalog_rating: detail.catalog_rating,
            runtime_minutes: detail.runtime_minutes,
            user_rating: user_rating.clamp(MIN_USER_RATING, MAX_USER_RATING),
            rating_event_count,
        }
    }
}
