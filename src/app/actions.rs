//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after each event. The plugin shim
//! executes them in order; nothing in the library calls Zellij directly.
//!
//! # Example
//!
//! ```rust
//! use popcorn::app::Action;
//!
//! let actions = vec![
//!     Action::ScheduleDebounce { seconds: 0.3 },
//!     Action::RenamePane("popcorn".to_string()),
//! ];
//! ```

use crate::fetch::PendingRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a catalog GET request through `web_request`.
    ///
    /// The request tag travels in the request context and comes back with the
    /// `WebRequestResult` event.
    IssueRequest(PendingRequest),

    /// Arms a timer whose expiry is delivered as a debounce event.
    ScheduleDebounce {
        /// Delay in seconds.
        seconds: f64,
    },

    /// Renames the plugin pane.
    RenamePane(String),
}
