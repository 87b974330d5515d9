//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold
//! only display-ready data: strings are already formatted, lists are already
//! windowed to the available height, and highlight ranges are precomputed.
//!
//! # Layout
//!
//! ```text
//! [NavBar: logo, search box, result count]
//! [Results panel] │ [Detail panel or Watched panel]
//! [Notice]
//! [Footer]
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub nav: NavInfo,
    pub results: ResultsPanel,
    /// Right-hand box: the open detail replaces the watched list.
    pub side: SidePanel,
    /// One-line message about storage or permissions, if any.
    pub notice: Option<String>,
    pub footer: FooterInfo,
}

/// Top navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavInfo {
    pub query: String,
    /// Whether the search box has focus (cursor is drawn).
    pub is_typing: bool,
    /// Text like "Found 10 results".
    pub result_count: String,
}

/// Status line shown in place of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Error(String),
    /// Nothing to show; the message hints at what to do.
    Empty(String),
    Ready,
}

/// Left box with search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPanel {
    /// Size of the whole result set, not just the visible rows.
    pub total: usize,
    pub collapsed: bool,
    pub is_focused: bool,
    pub status: ListStatus,
    /// Visible window of rows.
    pub rows: Vec<ResultRow>,
}

/// One search result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub year: String,
    /// Cursor is on this row.
    pub is_selected: bool,
    /// This row's detail is open.
    pub is_open: bool,
    /// Title is already in the watchlist.
    pub is_watched: bool,
    /// Character ranges `(start, end)` of the title matching the query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Right-hand box content.
#[derive(Debug, Clone, PartialEq)]
pub enum SidePanel {
    Detail(DetailView),
    Watched(WatchedPanel),
}

/// Detail box states.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    Error(String),
    Loaded(Box<DetailInfo>),
}

/// Formatted detail of the open title.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailInfo {
    pub title: String,
    /// "16 Jul 2010 • 148 min"
    pub subtitle: String,
    pub genre: String,
    /// "8.8 IMDb rating", or "No IMDb rating".
    pub catalog_rating: String,
    pub plot: String,
    pub cast: String,
    pub director: String,
    pub stars: StarBar,
    /// Rating from the watchlist when the title was rated before.
    pub previous_rating: Option<u8>,
    /// Whether Enter would add the title now.
    pub can_confirm: bool,
    pub adjustments: u32,
}

/// Star rating widget state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarBar {
    /// Explicitly chosen value.
    pub value: Option<u8>,
    /// Value shown dimmed when nothing was chosen yet.
    pub baseline: Option<u8>,
    pub max: u8,
}

/// Right box with the watched list.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedPanel {
    pub collapsed: bool,
    pub is_focused: bool,
    pub summary: SummaryLine,
    pub rows: Vec<WatchedRow>,
    pub empty_message: Option<String>,
}

/// Pre-formatted aggregate statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub count: String,
    pub catalog_rating: String,
    pub user_rating: String,
    pub runtime: String,
}

/// One watched entry row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedRow {
    pub title: String,
    pub catalog_rating: String,
    pub user_rating: String,
    pub runtime: String,
    pub is_selected: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "/: search  Tab: switch pane  q: quit").
    pub keybindings: String,
}
