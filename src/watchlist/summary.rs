//! Watchlist statistics.

use crate::domain::WatchedEntry;

/// Aggregates over the watched list.
///
/// Means are rounded for display: ratings to one decimal, runtime to whole
/// minutes. An empty input yields zero. Entries without a catalog rating or
/// runtime are left out of that mean instead of counting as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatchSummary {
    pub count: usize,
    pub mean_catalog_rating: f64,
    pub mean_user_rating: f64,
    pub mean_runtime_minutes: f64,
}

impl WatchSummary {
    #[must_use]
    pub fn compute(entries: &[WatchedEntry]) -> Self {
        let catalog = mean(entries.iter().filter_map(|e| e.catalog_rating));
        let user = mean(entries.iter().map(|e| f64::from(e.user_rating)));
        let runtime = mean(entries.iter().filter_map(|e| e.runtime_minutes.map(f64::from)));

        Self {
            count: entries.len(),
            mean_catalog_rating: round_to(catalog, 1),
            mean_user_rating: round_to(user, 1),
            mean_runtime_minutes: round_to(runtime, 0),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
