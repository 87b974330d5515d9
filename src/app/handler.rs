//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`AppState`] changes. It
//! pattern-matches the event, mutates state, and returns the actions the shim
//! must execute. After every event the named-key bindings are refreshed for
//! the view that is now active.
//!
//! # Event Types
//!
//! - **Search box**: `Char`, `Backspace`, `FocusSearch`
//! - **Navigation**: `CursorDown`, `CursorUp`, `CyclePane`, panel toggles
//! - **Detail**: `ToggleDetail`, `SetRating`, `AdjustRating`
//! - **Named keys**: `Key(NamedKey)` routed through the key bindings
//! - **System**: `DebounceElapsed`, `CatalogResponse`, `PermissionsResult`

use super::keys::{KeyCommand, NamedKey};
use super::modes::{InputMode, Pane};
use super::selection::{RatingDraft, Selection};
use super::state::DEFAULT_PANE_TITLE;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::WatchedEntry;
use crate::fetch::{is_searchable, RequestTag, SlotKind};
use crate::watchlist::WatchlistStore;
use std::time::Duration;

/// Events triggered by user input or the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Moves focus to the search box, keeping the query.
    FocusSearch,
    /// Switches focus between the results and watched panes.
    CyclePane,
    CursorDown,
    CursorUp,
    /// Opens the highlighted title, or closes it if it is already open.
    ToggleDetail,
    /// Sets the drafted rating of the open detail.
    SetRating(u8),
    /// Moves the drafted rating by the given number of stars.
    AdjustRating(i8),
    /// Removes the highlighted watched entry.
    RemoveWatched,
    ToggleResultsPanel,
    ToggleWatchedPanel,
    /// A key whose meaning depends on the active view.
    Key(NamedKey),
    /// A debounce timer fired.
    DebounceElapsed,
    /// A catalog request finished.
    CatalogResponse {
        tag: RequestTag,
        status: u16,
        body: Vec<u8>,
    },
    /// The user answered the permission prompt.
    PermissionsResult {
        granted: bool,
    },
    /// Hides the plugin.
    CloseFocus,
}

/// Notice shown when permissions are denied.
pub const PERMISSIONS_DENIED_NOTICE: &str = "Permissions denied: searches will fail and the watchlist is not saved";

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// Whether the UI must be re-rendered, and the actions to execute in order.
///
/// # Errors
///
/// Currently infallible; storage failures are shown as a notice instead of
/// being returned.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventName(event)).entered();

    let outcome = dispatch(state, event);
    state.refresh_key_bindings();
    outcome
}

/// Short event name for span fields; response bodies are not logged.
struct EventName<'a>(&'a Event);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::CatalogResponse { tag, status, body } => write!(
                f,
                "CatalogResponse({}#{}, {status}, {} bytes)",
                tag.slot.as_str(),
                tag.token.value(),
                body.len()
            ),
            other => write!(f, "{other:?}"),
        }
    }
}

#[allow(clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::Char(c) => {
            state.query.push(*c);
            Ok((true, on_query_changed(state)))
        }
        Event::Backspace => {
            if state.query.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, on_query_changed(state)))
        }
        Event::FocusSearch => {
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }
        Event::CyclePane => {
            state.input_mode = match state.input_mode {
                InputMode::Typing => InputMode::Browsing(Pane::Results),
                InputMode::Browsing(pane) => InputMode::Browsing(pane.next()),
            };
            Ok((true, vec![]))
        }
        Event::CursorDown => {
            if state.input_mode.is_typing() {
                state.input_mode = InputMode::Browsing(Pane::Results);
            } else {
                state.move_cursor_down();
            }
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            if state.input_mode.is_typing() {
                state.input_mode = InputMode::Browsing(Pane::Results);
            } else {
                state.move_cursor_up();
            }
            Ok((true, vec![]))
        }
        Event::ToggleDetail => Ok(toggle_detail(state)),
        Event::SetRating(rating) => {
            if state.detail.detail().is_none() {
                return Ok((false, vec![]));
            }
            let changed = state.selection.draft_mut().is_some_and(|draft| draft.set(*rating));
            Ok((changed, vec![]))
        }
        Event::AdjustRating(delta) => {
            let Some(baseline) = state.detail.detail().map(|d| state.rating_baseline(d)) else {
                return Ok((false, vec![]));
            };
            let changed = state
                .selection
                .draft_mut()
                .is_some_and(|draft| draft.step(*delta, baseline));
            Ok((changed, vec![]))
        }
        Event::RemoveWatched => {
            if state.input_mode != InputMode::Browsing(Pane::Watched) || state.selection.is_open() {
                return Ok((false, vec![]));
            }
            let Some(id) = state.watchlist.entries().get(state.watched_cursor).map(|e| e.id.clone()) else {
                return Ok((false, vec![]));
            };
            if let Err(e) = state.watchlist.remove(&id) {
                state.notice = Some(format!("Could not save watchlist: {e}"));
            }
            state.clamp_cursors();
            Ok((true, vec![]))
        }
        Event::ToggleResultsPanel => {
            state.results_collapsed = !state.results_collapsed;
            Ok((true, vec![]))
        }
        Event::ToggleWatchedPanel => {
            state.watched_collapsed = !state.watched_collapsed;
            Ok((true, vec![]))
        }
        Event::Key(key) => Ok(handle_named_key(state, *key)),
        Event::DebounceElapsed => {
            if state.pending_timers == 0 {
                return Ok((false, vec![]));
            }
            state.pending_timers -= 1;
            if state.pending_timers > 0 {
                tracing::trace!(pending = state.pending_timers, "debounce superseded");
                return Ok((false, vec![]));
            }
            Ok((true, submit_search(state)))
        }
        Event::CatalogResponse { tag, status, body } => Ok(apply_response(state, tag, *status, body)),
        Event::PermissionsResult { granted } => {
            if *granted {
                attach_storage(state);
            } else {
                tracing::warn!("permissions denied");
                state.notice = Some(PERMISSIONS_DENIED_NOTICE.to_string());
            }
            Ok((true, vec![]))
        }
        Event::CloseFocus => {
            state.search.cancel();
            state.pending_timers = 0;
            let mut actions = close_detail(state);
            actions.push(Action::CloseFocus);
            Ok((false, actions))
        }
    }
}

/// Reacts to an edit of the query: closes the detail, drops the previous
/// results along with the in-flight search, then searches now or schedules a
/// debounce timer.
fn on_query_changed(state: &mut AppState) -> Vec<Action> {
    let mut actions = close_detail(state);
    state.search.clear();
    state.results_cursor = 0;

    if !is_searchable(&state.query) {
        return actions;
    }

    if state.settings.debounce_ms == 0 {
        actions.extend(submit_search(state));
    } else {
        state.pending_timers += 1;
        actions.push(Action::ScheduleDebounce {
            seconds: Duration::from_millis(state.settings.debounce_ms).as_secs_f64(),
        });
    }
    actions
}

fn submit_search(state: &mut AppState) -> Vec<Action> {
    state.results_cursor = 0;
    state
        .search
        .submit(&state.query, &state.settings.catalog)
        .map(Action::IssueRequest)
        .into_iter()
        .collect()
}

fn toggle_detail(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(id) = state.highlighted_id() else {
        if state.selection.is_open() {
            return (true, close_detail(state));
        }
        return (false, vec![]);
    };

    if state.selection.selected_id() == Some(id.as_str()) {
        return (true, close_detail(state));
    }

    let mut actions = restore_pane_title(state);
    tracing::debug!(id = %id, "opening detail");
    state.selection = Selection::Detail {
        id: id.clone(),
        draft: RatingDraft::default(),
    };
    if let Some(request) = state.detail.open(&id, &state.settings.catalog) {
        actions.push(Action::IssueRequest(request));
    }
    (true, actions)
}

/// Closes the detail, if open, and cancels its fetch.
fn close_detail(state: &mut AppState) -> Vec<Action> {
    if !state.selection.is_open() {
        return vec![];
    }
    state.selection = Selection::Idle;
    state.detail.close();
    restore_pane_title(state)
}

fn restore_pane_title(state: &mut AppState) -> Vec<Action> {
    if state.pane_renamed {
        state.pane_renamed = false;
        vec![Action::RenamePane(DEFAULT_PANE_TITLE.to_string())]
    } else {
        vec![]
    }
}

fn handle_named_key(state: &mut AppState, key: NamedKey) -> (bool, Vec<Action>) {
    if let Some(command) = state.key_bindings.take(key) {
        tracing::debug!(key = ?key, command = ?command, "named key binding fired");
        return run_command(state, command);
    }

    if state.input_mode.is_typing() {
        state.input_mode = InputMode::Browsing(Pane::Results);
        return (true, vec![]);
    }
    (false, vec![])
}

fn run_command(state: &mut AppState, command: KeyCommand) -> (bool, Vec<Action>) {
    match command {
        KeyCommand::CloseDetail => (true, close_detail(state)),
        KeyCommand::ConfirmRating => confirm_rating(state),
        KeyCommand::FocusSearch => {
            state.input_mode = InputMode::Typing;
            state.query.clear();
            (true, on_query_changed(state))
        }
    }
}

/// Adds the open detail with its drafted rating to the watchlist, then closes
/// the detail. Does nothing until a rating is chosen and the detail loaded.
fn confirm_rating(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(draft) = state.selection.draft().copied() else {
        return (false, vec![]);
    };
    let (Some(rating), Some(detail)) = (draft.value(), state.detail.detail()) else {
        tracing::debug!("nothing to confirm");
        return (false, vec![]);
    };

    let entry = WatchedEntry::from_detail(detail, rating, draft.adjustments());
    tracing::info!(id = %entry.id, rating, adjustments = draft.adjustments(), "adding to watchlist");

    if let Err(e) = state.watchlist.add(entry) {
        state.notice = Some(format!("Could not save watchlist: {e}"));
    }
    state.watched_cursor = state.watchlist.len().saturating_sub(1);
    (true, close_detail(state))
}

fn apply_response(state: &mut AppState, tag: &RequestTag, status: u16, body: &[u8]) -> (bool, Vec<Action>) {
    match tag.slot {
        SlotKind::Search => {
            let applied = state.search.complete(tag, status, body);
            if applied {
                state.clamp_cursors();
            }
            (applied, vec![])
        }
        SlotKind::Detail => {
            if !state.detail.complete(tag, status, body) {
                return (false, vec![]);
            }
            let Some(detail) = state.detail.detail() else {
                return (true, vec![]);
            };
            let title = format!("Title | {}", detail.title);
            state.pane_renamed = true;
            (true, vec![Action::RenamePane(title)])
        }
    }
}

/// Swaps the in-memory watchlist for the file-backed one, carrying over any
/// entries rated before permissions arrived.
fn attach_storage(state: &mut AppState) {
    let (mut store, notice) = WatchlistStore::open(&state.settings.storage);

    for entry in state.watchlist.entries() {
        if let Err(e) = store.add(entry.clone()) {
            tracing::warn!(error = %e, "failed to carry over watched entry");
        }
    }

    tracing::info!(backend = %store.backend_name(), count = store.len(), "watchlist attached");
    state.watchlist = store;
    state.notice = notice.map(ToString::to_string);
    state.clamp_cursors();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppSettings;
    use crate::catalog::{CatalogClient, DEFAULT_API_URL};
    use crate::domain::error::{NOT_FOUND_MESSAGE, SEARCH_FAILED_MESSAGE};
    use crate::fetch::PendingRequest;
    use crate::ui::theme::Theme;
    use crate::watchlist::{StorageSettings, DEFAULT_STORAGE_KEY};
    use std::path::Path;

    const BATMAN: &str = r#"{"Search":[
        {"Title":"Batman Begins","Year":"2005","imdbID":"tt0372784","Poster":"N/A"},
        {"Title":"The Dark Knight","Year":"2008","imdbID":"tt0468569","Poster":"N/A"}
    ],"Response":"True"}"#;

    const DARK_KNIGHT: &str = r#"{"Title":"The Dark Knight","Year":"2008","Released":"18 Jul 2008",
        "Runtime":"152 min","imdbRating":"9.0","imdbID":"tt0468569","Director":"Christopher Nolan",
        "Genre":"Action, Crime, Drama","Plot":"Batman faces the Joker.","Actors":"Christian Bale","Response":"True"}"#;

    fn state_with(storage: &Path, debounce_ms: u64) -> AppState {
        AppState::new(
            AppSettings {
                catalog: CatalogClient::new(DEFAULT_API_URL, Some("key".to_string())),
                debounce_ms,
                storage: StorageSettings {
                    path: storage.to_path_buf(),
                    key: DEFAULT_STORAGE_KEY.to_string(),
                },
            },
            Theme::default(),
        )
    }

    fn send(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
        text.chars().flat_map(|c| send(state, Event::Char(c))).collect()
    }

    fn requests(actions: &[Action]) -> Vec<PendingRequest> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::IssueRequest(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    fn respond(state: &mut AppState, request: &PendingRequest, status: u16, body: &str) -> Vec<Action> {
        send(
            state,
            Event::CatalogResponse {
                tag: request.tag,
                status,
                body: body.as_bytes().to_vec(),
            },
        )
    }

    /// Fires every pending debounce timer, returning the actions of the last.
    fn fire_timers(state: &mut AppState) -> Vec<Action> {
        let mut actions = vec![];
        while state.pending_timers > 0 {
            actions = send(state, Event::DebounceElapsed);
        }
        actions
    }

    /// Searches "batman", opens the second result and loads its detail.
    /// The first cursor move only leaves the search box.
    fn open_dark_knight(state: &mut AppState) -> Vec<Action> {
        let search = requests(&type_text(state, "batman"));
        respond(state, search.last().unwrap(), 200, BATMAN);

        send(state, Event::CursorDown);
        send(state, Event::CursorDown);
        let detail = requests(&send(state, Event::ToggleDetail));
        assert_eq!(detail.len(), 1);
        respond(state, &detail[0], 200, DARK_KNIGHT)
    }

    #[test]
    fn short_queries_never_hit_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);

        let actions = type_text(&mut state, "ba");
        assert!(requests(&actions).is_empty());
        assert!(state.search.results().is_empty());

        let actions = send(&mut state, Event::Char('t'));
        assert_eq!(requests(&actions).len(), 1);
    }

    #[test]
    fn search_rate_and_add_to_watchlist() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);
        send(&mut state, Event::PermissionsResult { granted: true });

        let actions = open_dark_knight(&mut state);
        assert_eq!(actions, vec![Action::RenamePane("Title | The Dark Knight".to_string())]);
        assert_eq!(state.key_bindings.get(NamedKey::Escape), Some(KeyCommand::CloseDetail));

        send(&mut state, Event::SetRating(8));
        send(&mut state, Event::SetRating(10));
        let actions = send(&mut state, Event::Key(NamedKey::Enter));

        assert_eq!(actions, vec![Action::RenamePane(DEFAULT_PANE_TITLE.to_string())]);
        assert_eq!(state.selection, Selection::Idle);
        let entry = state.watchlist.get("tt0468569").unwrap();
        assert_eq!(entry.user_rating, 10);
        assert_eq!(entry.rating_event_count, 2);
        assert_eq!(entry.runtime_minutes, Some(152));

        let summary = state.watchlist.summary();
        assert_eq!(summary.count, 1);
        assert!((summary.mean_catalog_rating - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rerating_replaces_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);
        send(&mut state, Event::PermissionsResult { granted: true });

        open_dark_knight(&mut state);
        send(&mut state, Event::SetRating(6));
        send(&mut state, Event::Key(NamedKey::Enter));

        let detail = requests(&send(&mut state, Event::ToggleDetail));
        respond(&mut state, &detail[0], 200, DARK_KNIGHT);
        let vm = state.compute_viewmodel(30, 100);
        let crate::ui::SidePanel::Detail(crate::ui::DetailView::Loaded(info)) = vm.side else {
            panic!("expected loaded detail");
        };
        assert_eq!(info.previous_rating, Some(6));
        assert_eq!(info.stars.baseline, Some(6));

        send(&mut state, Event::AdjustRating(1));
        send(&mut state, Event::Key(NamedKey::Enter));

        assert_eq!(state.watchlist.len(), 1);
        assert_eq!(state.watchlist.get("tt0468569").map(|e| e.user_rating), Some(7));
    }

    #[test]
    fn enter_without_rating_keeps_detail_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);
        open_dark_knight(&mut state);

        let (render, actions) = handle_event(&mut state, &Event::Key(NamedKey::Enter)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.selection.is_open());
        assert!(state.watchlist.is_empty());
        assert_eq!(state.key_bindings.get(NamedKey::Enter), Some(KeyCommand::ConfirmRating));
    }

    #[test]
    fn escape_closes_detail_and_cancels_its_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);
        let search = requests(&type_text(&mut state, "batman"));
        respond(&mut state, search.last().unwrap(), 200, BATMAN);
        send(&mut state, Event::CursorDown);
        let detail = requests(&send(&mut state, Event::ToggleDetail));

        send(&mut state, Event::Key(NamedKey::Escape));
        assert_eq!(state.selection, Selection::Idle);

        let actions = respond(&mut state, &detail[0], 200, DARK_KNIGHT);
        assert!(actions.is_empty());
        assert!(state.detail.state().is_none());
    }

    #[test]
    fn toggling_the_open_title_closes_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);
        open_dark_knight(&mut state);

        let actions = send(&mut state, Event::ToggleDetail);
        assert_eq!(actions, vec![Action::RenamePane(DEFAULT_PANE_TITLE.to_string())]);
        assert!(!state.selection.is_open());
    }

    #[test]
    fn stale_search_response_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);

        let first = requests(&type_text(&mut state, "bat"));
        let second = requests(&send(&mut state, Event::Char('m')));

        respond(&mut state, &second[0], 200, BATMAN);
        let (render, _) = handle_event(
            &mut state,
            &Event::CatalogResponse {
                tag: first[0].tag,
                status: 500,
                body: vec![],
            },
        )
        .unwrap();

        assert!(!render);
        assert_eq!(state.search.results().len(), 2);
        assert_eq!(state.search.error_message(), None);
    }

    #[test]
    fn errors_are_shown_with_fixed_messages() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);

        let request = requests(&type_text(&mut state, "qqqqq"));
        respond(&mut state, request.last().unwrap(), 200, r#"{"Response":"False","Error":"Movie not found!"}"#);
        assert_eq!(state.search.error_message(), Some(NOT_FOUND_MESSAGE));

        let request = requests(&send(&mut state, Event::Char('q')));
        respond(&mut state, &request[0], 500, "");
        assert_eq!(state.search.error_message(), Some(SEARCH_FAILED_MESSAGE));
    }

    #[test]
    fn debounce_submits_only_after_last_timer() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 300);

        let actions = type_text(&mut state, "heat");
        assert!(requests(&actions).is_empty());
        assert_eq!(
            actions.iter().filter(|a| matches!(a, Action::ScheduleDebounce { .. })).count(),
            2
        );

        assert!(send(&mut state, Event::DebounceElapsed).is_empty());
        let actions = send(&mut state, Event::DebounceElapsed);
        let issued = requests(&actions);
        assert_eq!(issued.len(), 1);
        assert!(issued[0].url.ends_with("&s=heat"));

        assert!(send(&mut state, Event::DebounceElapsed).is_empty());
    }

    #[test]
    fn new_search_closes_open_detail() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);
        open_dark_knight(&mut state);

        send(&mut state, Event::FocusSearch);
        let actions = send(&mut state, Event::Char('s'));

        assert!(actions.contains(&Action::RenamePane(DEFAULT_PANE_TITLE.to_string())));
        assert!(!state.selection.is_open());
    }

    #[test]
    fn enter_outside_search_box_focuses_and_clears_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);
        let search = requests(&type_text(&mut state, "batman"));
        respond(&mut state, search.last().unwrap(), 200, BATMAN);

        send(&mut state, Event::Key(NamedKey::Escape));
        assert_eq!(state.input_mode, InputMode::Browsing(Pane::Results));

        send(&mut state, Event::Key(NamedKey::Enter));
        assert_eq!(state.input_mode, InputMode::Typing);
        assert!(state.query.is_empty());
        assert!(state.search.results().is_empty());
    }

    #[test]
    fn watchlist_persists_and_removal_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        let mut state = state_with(&path, 0);
        send(&mut state, Event::PermissionsResult { granted: true });

        open_dark_knight(&mut state);
        send(&mut state, Event::SetRating(9));
        send(&mut state, Event::Key(NamedKey::Enter));

        let mut restarted = state_with(&path, 0);
        send(&mut restarted, Event::PermissionsResult { granted: true });
        assert_eq!(restarted.watchlist.len(), 1);

        send(&mut restarted, Event::CyclePane);
        send(&mut restarted, Event::CyclePane);
        assert_eq!(restarted.input_mode, InputMode::Browsing(Pane::Watched));
        send(&mut restarted, Event::RemoveWatched);
        send(&mut restarted, Event::RemoveWatched);
        assert!(restarted.watchlist.is_empty());
        assert_eq!(restarted.notice, None);
    }

    #[test]
    fn close_cancels_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);
        let search = requests(&type_text(&mut state, "batman"));

        let actions = send(&mut state, Event::CloseFocus);
        assert_eq!(actions.last(), Some(&Action::CloseFocus));

        respond(&mut state, search.last().unwrap(), 200, BATMAN);
        assert!(state.search.results().is_empty());
    }

    #[test]
    fn denied_permissions_leave_a_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);
        send(&mut state, Event::PermissionsResult { granted: false });

        assert_eq!(state.notice.as_deref(), Some(PERMISSIONS_DENIED_NOTICE));
    }

    #[test]
    fn query_edit_during_debounce_hides_previous_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 300);

        type_text(&mut state, "batman");
        let search = requests(&fire_timers(&mut state));
        respond(&mut state, &search[0], 200, BATMAN);
        assert_eq!(state.search.results().len(), 2);

        let actions = send(&mut state, Event::Char('x'));
        assert!(requests(&actions).is_empty());
        assert!(state.search.results().is_empty());
        assert_eq!(state.search.error_message(), None);

        let vm = state.compute_viewmodel(30, 100);
        assert!(vm.results.rows.is_empty());
        assert_eq!(vm.results.status, crate::ui::ListStatus::Loading);
        assert_eq!(vm.nav.result_count, "Found 0 results");

        send(&mut state, Event::CursorDown);
        assert!(send(&mut state, Event::ToggleDetail).is_empty());
        assert!(!state.selection.is_open());
    }

    #[test]
    fn previous_error_is_dropped_on_edit() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 300);

        type_text(&mut state, "zzzz");
        let search = requests(&fire_timers(&mut state));
        respond(&mut state, &search[0], 500, "");
        assert_eq!(state.search.error_message(), Some(SEARCH_FAILED_MESSAGE));

        send(&mut state, Event::Backspace);
        assert_eq!(state.search.error_message(), None);
    }

    #[test]
    fn rapid_edits_with_debounce_only_show_last_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 300);
        let only_batman = r#"{"Search":[
            {"Title":"Batman","Year":"1989","imdbID":"tt0096895","Poster":"N/A"}
        ],"Response":"True"}"#;

        type_text(&mut state, "bat");
        let bat = requests(&fire_timers(&mut state));
        type_text(&mut state, "ma");
        respond(&mut state, &bat[0], 200, BATMAN);
        assert!(state.search.results().is_empty());

        let batma = requests(&fire_timers(&mut state));
        assert!(batma[0].url.ends_with("&s=batma"));
        send(&mut state, Event::Char('n'));
        respond(&mut state, &batma[0], 200, BATMAN);
        assert!(state.search.results().is_empty());

        let batman = requests(&fire_timers(&mut state));
        assert!(batman[0].url.ends_with("&s=batman"));
        respond(&mut state, &bat[0], 404, "");
        assert!(state.search.is_loading());

        respond(&mut state, &batman[0], 200, only_batman);
        respond(&mut state, &batma[0], 500, "");
        let ids: Vec<_> = state.search.results().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["tt0096895"]);
        assert_eq!(state.search.error_message(), None);
    }

    #[test]
    fn enter_in_search_box_leaves_it_without_confirming() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir.path().join("s.json"), 0);
        open_dark_knight(&mut state);
        send(&mut state, Event::SetRating(8));

        send(&mut state, Event::FocusSearch);
        assert!(state.key_bindings.is_empty());
        send(&mut state, Event::Key(NamedKey::Enter));

        assert!(state.watchlist.is_empty());
        assert!(state.selection.is_open());
        assert_eq!(state.input_mode, InputMode::Browsing(Pane::Results));

        send(&mut state, Event::Key(NamedKey::Enter));
        assert_eq!(state.watchlist.get("tt0468569").map(|e| e.user_rating), Some(8));
    }
}
