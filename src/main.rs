//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the popcorn library and the Zellij plugin
//! system: maps Zellij events to library events and executes the returned
//! actions through the plugin API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 3. **Permissions**: Once granted, the watchlist is read from disk
//! 4. **Update**: Translate events, delegate to `handle_event`, run actions
//! 5. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key(..)` → see keybindings below
//! - `WebRequestResult` → `Event::CatalogResponse` (only for tagged requests)
//! - `Timer` → `Event::DebounceElapsed`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//! - `Tab`: Switch between results and watched list
//! - `Esc` / `Enter`: Bound per view (close detail, add to list, focus search)
//!
//! While typing in the search box every other character edits the query.
//!
//! Otherwise:
//! - `/`: Focus the search box
//! - `j` / `k`: Move down / up
//! - `Space`, `l`, `Right`: Open the highlighted title (toggle)
//! - `1`-`9`, `0`: Rate 1-9, 10 (detail open)
//! - `h` / `l`, `Left` / `Right`: One star less / more (detail open)
//! - `d` / `Delete`: Remove the highlighted watched entry
//! - `[` / `]`: Collapse or expand results / watched list
//! - `q`: Hide the plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use popcorn::{handle_event, Action, Config, Event, NamedKey, RequestTag};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: popcorn::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: popcorn::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Catalog requests
    /// - `FullHdAccess`: Watchlist storage file
    /// - `ChangeApplicationState`: Pane rename and hide
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        popcorn::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        self.app = popcorn::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::FullHdAccess,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match RequestTag::from_context(&context) {
                    Some(tag) => Event::CatalogResponse { tag, status, body },
                    None => {
                        tracing::debug!(status, "ignoring untagged web request result");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => Event::PermissionsResult {
                granted: matches!(permissions, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for a in actions {
                    Self::execute_action(a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        popcorn::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::CursorDown),
                BareKey::Char('p') => Some(Event::CursorUp),
                _ => None,
            };
        }

        let typing = self.app.input_mode.is_typing();
        let detail_open = self.app.selection.is_open();

        Some(match key.bare_key {
            BareKey::Esc => Event::Key(NamedKey::Escape),
            BareKey::Enter => Event::Key(NamedKey::Enter),
            BareKey::Down => Event::CursorDown,
            BareKey::Up => Event::CursorUp,
            BareKey::Tab => Event::CyclePane,
            BareKey::Backspace if typing => Event::Backspace,
            BareKey::Char(c) if typing => Event::Char(c),
            _ if typing => return None,

            BareKey::Char('/') => Event::FocusSearch,
            BareKey::Char('j') => Event::CursorDown,
            BareKey::Char('k') => Event::CursorUp,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char('[') => Event::ToggleResultsPanel,
            BareKey::Char(']') => Event::ToggleWatchedPanel,
            BareKey::Char('d') | BareKey::Delete => Event::RemoveWatched,
            BareKey::Char(' ') => Event::ToggleDetail,

            BareKey::Char(c @ '1'..='9') if detail_open => Event::SetRating(c as u8 - b'0'),
            BareKey::Char('0') if detail_open => Event::SetRating(10),
            BareKey::Char('h') | BareKey::Left if detail_open => Event::AdjustRating(-1),
            BareKey::Char('l') | BareKey::Right if detail_open => Event::AdjustRating(1),
            BareKey::Char('l') | BareKey::Right => Event::ToggleDetail,
            _ => return None,
        })
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::IssueRequest(request) => {
                tracing::debug!(slot = request.tag.slot.as_str(), token = request.tag.token.value(), "issuing request");
                web_request(
                    request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.tag.to_context(),
                );
            }
            Action::ScheduleDebounce { seconds } => set_timeout(seconds),
            Action::RenamePane(name) => rename_plugin_pane(get_plugin_ids().plugin_id, name),
        }
    }
}
