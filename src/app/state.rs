//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single owner of all plugin state:
//! the search query and focus, the two fetch slots, the selection with its
//! rating draft, the watchlist and the named-key bindings. It is mutated only
//! by [`handle_event`](crate::app::handle_event) and rendered through an
//! immutable [`UIViewModel`] snapshot.
//!
//! # State Components
//!
//! - **Query**: Search text typed by the user
//! - **Search / Detail**: Cancellable catalog fetches with their results
//! - **Selection**: Which title has its detail open, plus the rating draft
//! - **Watchlist**: Persisted rated titles
//! - **Cursors**: Highlighted row per pane
//! - **Key bindings**: Named keys bound by the active view

use super::keys::{KeyBindings, KeyCommand, NamedKey};
use super::modes::{InputMode, Pane};
use super::selection::Selection;
use crate::catalog::CatalogClient;
use crate::fetch::{is_searchable, DetailFetcher, DetailState, SearchFetcher, SearchStatus, MIN_QUERY_LEN};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailInfo, DetailView, FooterInfo, ListStatus, NavInfo, ResultRow, ResultsPanel, SidePanel, StarBar,
    SummaryLine, UIViewModel, WatchedPanel, WatchedRow,
};
use crate::domain::{ItemDetail, MAX_USER_RATING};
use crate::watchlist::{StorageSettings, WatchlistStore};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Pane name used when no detail is loaded.
pub const DEFAULT_PANE_TITLE: &str = "popcorn";

/// Rows taken by everything except the two panels: blank line, nav bar,
/// border, notice, border, footer and the unused last row.
const CHROME_ROWS: usize = 7;

/// Settings that shape behavior but never change at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub catalog: CatalogClient,
    /// Delay between the last keystroke and the search. Zero searches at once.
    pub debounce_ms: u64,
    pub storage: StorageSettings,
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    pub settings: AppSettings,

    /// Current search text, as typed.
    pub query: String,

    pub input_mode: InputMode,

    pub search: SearchFetcher,

    pub detail: DetailFetcher,

    /// Open detail and its rating draft.
    ///
    /// Kept in step with `detail`: `Selection::Detail(id)` exactly when the
    /// detail fetcher holds `id`.
    pub selection: Selection,

    /// Starts in memory; replaced by the file-backed list once permissions
    /// are granted.
    pub watchlist: WatchlistStore,

    pub results_cursor: usize,
    pub watched_cursor: usize,

    pub results_collapsed: bool,
    pub watched_collapsed: bool,

    /// Storage or permission message shown above the footer.
    pub notice: Option<String>,

    pub key_bindings: KeyBindings,

    /// Debounce timers scheduled but not yet fired. Only the last one
    /// submits the query.
    pub pending_timers: u32,

    /// Whether the pane currently carries a title other than the default.
    pub pane_renamed: bool,

    pub theme: Theme,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// Starts typing into an empty search box, with an empty in-memory
    /// watchlist.
    #[must_use]
    pub fn new(settings: AppSettings, theme: Theme) -> Self {
        let watchlist = WatchlistStore::in_memory(settings.storage.key.clone());
        let mut state = Self {
            settings,
            query: String::new(),
            input_mode: InputMode::Typing,
            search: SearchFetcher::default(),
            detail: DetailFetcher::default(),
            selection: Selection::Idle,
            watchlist,
            results_cursor: 0,
            watched_cursor: 0,
            results_collapsed: false,
            watched_collapsed: false,
            notice: None,
            key_bindings: KeyBindings::new(),
            pending_timers: 0,
            pane_renamed: false,
            theme,
        };
        state.refresh_key_bindings();
        state
    }

    /// Re-binds named keys for the active view.
    ///
    /// - Typing: nothing, Enter and Escape leave the search box.
    /// - Detail open: Escape closes it, Enter confirms the rating.
    /// - Idle: Enter focuses the search box.
    pub fn refresh_key_bindings(&mut self) {
        self.key_bindings.clear();

        if self.input_mode.is_typing() {
            return;
        }
        if self.selection.is_open() {
            self.key_bindings.bind(NamedKey::Escape, KeyCommand::CloseDetail);
            self.key_bindings.bind(NamedKey::Enter, KeyCommand::ConfirmRating);
        } else {
            self.key_bindings.bind(NamedKey::Enter, KeyCommand::FocusSearch);
        }
    }

    /// Moves the cursor of the focused pane down, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let Some(pane) = self.input_mode.pane() else {
            return;
        };
        let len = self.pane_len(pane);
        if len == 0 {
            return;
        }
        let cursor = self.cursor_mut(pane);
        *cursor = (*cursor + 1) % len;
    }

    /// Moves the cursor of the focused pane up, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let Some(pane) = self.input_mode.pane() else {
            return;
        };
        let len = self.pane_len(pane);
        if len == 0 {
            return;
        }
        let cursor = self.cursor_mut(pane);
        *cursor = if *cursor == 0 { len - 1 } else { *cursor - 1 };
    }

    /// Keeps both cursors inside their lists.
    pub fn clamp_cursors(&mut self) {
        self.results_cursor = self.results_cursor.min(self.search.results().len().saturating_sub(1));
        self.watched_cursor = self.watched_cursor.min(self.watchlist.len().saturating_sub(1));
    }

    fn pane_len(&self, pane: Pane) -> usize {
        match pane {
            Pane::Results => self.search.results().len(),
            Pane::Watched => self.watchlist.len(),
        }
    }

    fn cursor_mut(&mut self, pane: Pane) -> &mut usize {
        match pane {
            Pane::Results => &mut self.results_cursor,
            Pane::Watched => &mut self.watched_cursor,
        }
    }

    /// Id of the row under the cursor in the focused pane.
    #[must_use]
    pub fn highlighted_id(&self) -> Option<String> {
        match self.input_mode.pane()? {
            Pane::Results if !self.results_collapsed => {
                self.search.results().get(self.results_cursor).map(|r| r.id.clone())
            }
            Pane::Watched if !self.watched_collapsed && !self.selection.is_open() => {
                self.watchlist.entries().get(self.watched_cursor).map(|e| e.id.clone())
            }
            _ => None,
        }
    }

    /// The rating the star bar starts from: the previous user rating, else
    /// the catalog rating rounded to whole stars.
    #[must_use]
    pub fn rating_baseline(&self, detail: &ItemDetail) -> Option<u8> {
        self.watchlist
            .get(&detail.id)
            .map(|entry| entry.user_rating)
            .or_else(|| detail.rounded_catalog_rating())
    }

    /// Computes a renderable UI view model from current state and terminal
    /// dimensions.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let panel_rows = rows.saturating_sub(CHROME_ROWS);

        UIViewModel {
            nav: self.compute_nav(),
            results: self.compute_results(panel_rows.saturating_sub(1), cols / 2),
            side: self.compute_side(panel_rows),
            notice: self.notice.clone(),
            footer: self.compute_footer(),
        }
    }

    fn compute_nav(&self) -> NavInfo {
        let count = self.search.results().len();
        NavInfo {
            query: self.query.clone(),
            is_typing: self.input_mode.is_typing(),
            result_count: format!("Found {count} result{}", if count == 1 { "" } else { "s" }),
        }
    }

    fn compute_results(&self, capacity: usize, width: usize) -> ResultsPanel {
        let status = match self.search.status() {
            SearchStatus::Loading => ListStatus::Loading,
            SearchStatus::Idle if self.pending_timers > 0 && is_searchable(&self.query) => ListStatus::Loading,
            SearchStatus::Failed(err) => ListStatus::Error(err.search_message().to_string()),
            SearchStatus::Idle if self.search.results().is_empty() => ListStatus::Empty(format!(
                "Type at least {MIN_QUERY_LEN} characters to search"
            )),
            _ => ListStatus::Ready,
        };

        let is_focused = self.input_mode.pane() == Some(Pane::Results);
        let matcher = (!self.query.trim().is_empty()).then(SkimMatcherV2::default);

        let results = self.search.results();
        let (start, end) = visible_window(results.len(), self.results_cursor, capacity);

        let rows = results[start..end]
            .iter()
            .enumerate()
            .map(|(offset, item)| {
                let title = truncate_chars(&item.title, width.saturating_sub(12));
                ResultRow {
                    highlight_ranges: matcher
                        .as_ref()
                        .map_or_else(Vec::new, |m| self.compute_highlight_ranges(&title, m)),
                    title,
                    year: item.year.clone(),
                    is_selected: is_focused && start + offset == self.results_cursor,
                    is_open: self.selection.selected_id() == Some(item.id.as_str()),
                    is_watched: self.watchlist.contains(&item.id),
                }
            })
            .collect();

        ResultsPanel {
            total: results.len(),
            collapsed: self.results_collapsed,
            is_focused,
            status,
            rows,
        }
    }

    /// Coalesces the fuzzy match indices of the query into `(start, end)`
    /// character ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.query.trim()) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_side(&self, panel_rows: usize) -> SidePanel {
        match self.detail.state() {
            Some(DetailState::Loading) => SidePanel::Detail(DetailView::Loading),
            Some(DetailState::Failed(err)) => SidePanel::Detail(DetailView::Error(err.detail_message().to_string())),
            Some(DetailState::Loaded(detail)) => SidePanel::Detail(DetailView::Loaded(Box::new(self.compute_detail(detail)))),
            None => SidePanel::Watched(self.compute_watched(panel_rows.saturating_sub(2))),
        }
    }

    fn compute_detail(&self, detail: &ItemDetail) -> DetailInfo {
        let draft = self.selection.draft().copied().unwrap_or_default();
        let previous_rating = self.watchlist.get(&detail.id).map(|e| e.user_rating);

        let runtime = detail
            .runtime_minutes
            .map_or_else(|| "runtime unknown".to_string(), |m| format!("{m} min"));
        let released = if detail.release_date.is_empty() { &detail.year } else { &detail.release_date };

        DetailInfo {
            title: detail.title.clone(),
            subtitle: format!("{released} • {runtime}"),
            genre: detail.genre.clone(),
            catalog_rating: detail
                .catalog_rating
                .map_or_else(|| "No IMDb rating".to_string(), |r| format!("{r:.1} IMDb rating")),
            plot: detail.plot.clone(),
            cast: detail.cast.clone(),
            director: detail.director.clone(),
            stars: StarBar {
                value: draft.value(),
                baseline: self.rating_baseline(detail),
                max: MAX_USER_RATING,
            },
            previous_rating,
            can_confirm: draft.value().is_some(),
            adjustments: draft.adjustments(),
        }
    }

    fn compute_watched(&self, capacity: usize) -> WatchedPanel {
        let summary = self.watchlist.summary();
        let is_focused = self.input_mode.pane() == Some(Pane::Watched);
        let entries = self.watchlist.entries();
        let (start, end) = visible_window(entries.len(), self.watched_cursor, capacity);

        let rows = entries[start..end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| WatchedRow {
                title: entry.title.clone(),
                catalog_rating: entry.catalog_rating.map_or_else(|| "-".to_string(), |r| format!("{r:.1}")),
                user_rating: entry.user_rating.to_string(),
                runtime: entry.runtime_minutes.map_or_else(|| "-".to_string(), |m| format!("{m} min")),
                is_selected: is_focused && start + offset == self.watched_cursor,
            })
            .collect();

        WatchedPanel {
            collapsed: self.watched_collapsed,
            is_focused,
            summary: SummaryLine {
                count: format!("{} movie{}", summary.count, if summary.count == 1 { "" } else { "s" }),
                catalog_rating: format!("{:.1}", summary.mean_catalog_rating),
                user_rating: format!("{:.1}", summary.mean_user_rating),
                runtime: format!("{:.0} min", summary.mean_runtime_minutes),
            },
            rows,
            empty_message: self
                .watchlist
                .is_empty()
                .then(|| "Rate a movie to start your watchlist".to_string()),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.selection.is_open()) {
            (InputMode::Typing, _) => "Type to search  Enter/Esc: browse results  Ctrl+n/p: navigate",
            (InputMode::Browsing(_), true) => {
                "1-9,0: rate  h/l: adjust  Enter: add to list  Esc: close  j/k: navigate  q: quit"
            }
            (InputMode::Browsing(Pane::Results), false) => {
                "j/k: navigate  Space: details  Tab: watched  Enter: new search  [ ]: collapse  q: quit"
            }
            (InputMode::Browsing(Pane::Watched), false) => {
                "j/k: navigate  Space: details  d: remove  Tab: results  Enter: new search  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Window of at most `capacity` rows around `selected`, as `(start, end)`.
///
/// Keeps the selection near the middle and fills the window when close to
/// either end.
fn visible_window(len: usize, selected: usize, capacity: usize) -> (usize, usize) {
    if capacity == 0 || len == 0 {
        return (0, 0);
    }
    if len <= capacity {
        return (0, len);
    }
    let start = selected.saturating_sub(capacity / 2).min(len - capacity);
    (start, start + capacity)
}

/// Truncates to `max` characters, marking the cut with an ellipsis.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_API_URL;
    use crate::domain::SearchResultItem;
    use crate::watchlist::DEFAULT_STORAGE_KEY;

    fn settings() -> AppSettings {
        AppSettings {
            catalog: CatalogClient::new(DEFAULT_API_URL, Some("key".to_string())),
            debounce_ms: 0,
            storage: StorageSettings {
                path: std::path::PathBuf::from("/nonexistent/popcorn/storage.json"),
                key: DEFAULT_STORAGE_KEY.to_string(),
            },
        }
    }

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(3, 0, 10), (0, 3));
        assert_eq!(visible_window(20, 0, 5), (0, 5));
        assert_eq!(visible_window(20, 10, 5), (8, 13));
        assert_eq!(visible_window(20, 19, 5), (15, 20));
        assert_eq!(visible_window(20, 3, 0), (0, 0));
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("Amélie", 10), "Amélie");
        assert_eq!(truncate_chars("The Lord of the Rings", 8), "The Lor…");
    }

    #[test]
    fn typing_state_binds_nothing() {
        let state = AppState::new(settings(), Theme::default());
        assert!(state.key_bindings.is_empty());
    }

    #[test]
    fn browsing_idle_binds_enter_to_search() {
        let mut state = AppState::new(settings(), Theme::default());
        state.input_mode = InputMode::Browsing(Pane::Results);
        state.refresh_key_bindings();

        assert_eq!(state.key_bindings.get(NamedKey::Enter), Some(KeyCommand::FocusSearch));
        assert_eq!(state.key_bindings.get(NamedKey::Escape), None);
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let mut state = AppState::new(settings(), Theme::default());
        state.query = "bat".to_string();
        let ranges = state.compute_highlight_ranges("Batman Begins", &SkimMatcherV2::default());

        assert_eq!(ranges, vec![(0, 3)]);
    }

    #[test]
    fn empty_state_viewmodel() {
        let state = AppState::new(settings(), Theme::default());
        let vm = state.compute_viewmodel(24, 80);

        assert_eq!(vm.nav.result_count, "Found 0 results");
        assert!(matches!(vm.results.status, ListStatus::Empty(_)));
        let SidePanel::Watched(watched) = vm.side else {
            panic!("expected watched panel");
        };
        assert_eq!(watched.summary.count, "0 movies");
        assert!(watched.empty_message.is_some());
    }

    #[test]
    fn cursor_wraps_within_focused_pane() {
        let mut state = AppState::new(settings(), Theme::default());
        let request = state.search.submit("heat", &state.settings.catalog).unwrap();
        let body = serde_json::json!({
            "Search": [
                {"Title": "Heat", "Year": "1995", "imdbID": "tt0113277", "Poster": "N/A"},
                {"Title": "Heatwave", "Year": "2022", "imdbID": "tt0000002", "Poster": "N/A"}
            ],
            "Response": "True"
        });
        state.search.complete(&request.tag, 200, body.to_string().as_bytes());
        assert_eq!(state.search.results().len(), 2);
        assert_eq!(state.search.results()[0], SearchResultItem {
            id: "tt0113277".to_string(),
            title: "Heat".to_string(),
            year: "1995".to_string(),
            poster_url: None,
        });

        let vm = state.compute_viewmodel(CHROME_ROWS + 2, 80);
        assert_eq!(vm.results.rows.len(), 1);
        assert_eq!(vm.results.total, 2);

        state.input_mode = InputMode::Browsing(Pane::Results);
        state.move_cursor_up();
        assert_eq!(state.results_cursor, 1);
        state.move_cursor_down();
        assert_eq!(state.results_cursor, 0);
        assert_eq!(state.highlighted_id().as_deref(), Some("tt0113277"));
    }
}
