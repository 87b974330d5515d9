//! Input focus state for the application.
//!
//! The plugin is either typing into the search box or browsing one of the two
//! list panes. Focus decides how plain characters are interpreted and which
//! named-key bindings are active.
//!
//! # Example
//!
//! ```rust
//! use popcorn::app::modes::{InputMode, Pane};
//!
//! let mode = InputMode::Browsing(Pane::Results);
//! assert!(!mode.is_typing());
//! ```

/// A list pane that can hold the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    /// Search results of the current query.
    Results,
    /// The persisted watched list.
    Watched,
}

impl Pane {
    /// The other pane.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Results => Self::Watched,
            Self::Watched => Self::Results,
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keystrokes edit the search query.
    ///
    /// Characters and backspace go to the query; Enter and Escape move focus
    /// to the results pane.
    Typing,

    /// Keystrokes navigate the given pane.
    ///
    /// Available keybindings: j/k (navigate), space (open detail), tab (switch
    /// pane), / (search), d (remove watched), [ ] (collapse), q (quit).
    Browsing(Pane),
}

impl InputMode {
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Typing)
    }

    /// The focused pane, if browsing.
    #[must_use]
    pub const fn pane(self) -> Option<Pane> {
        match self {
            Self::Typing => None,
            Self::Browsing(pane) => Some(pane),
        }
    }
}
