//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the fetch, watchlist and UI
//! layers.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── WebRequestResult / Timer ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`keys`]: Named-key bindings re-bound per view
//! - [`modes`]: Input focus types
//! - [`selection`]: Open detail and rating draft
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keys::{KeyBindings, KeyCommand, NamedKey};
pub use modes::{InputMode, Pane};
pub use selection::{RatingDraft, Selection};
pub use state::{AppSettings, AppState, DEFAULT_PANE_TITLE};
