//! Central `AppState` container.

use ratatui::widgets::ListState;
use std::time::Instant;

use crate::logic::search_session::CancelToken;
use crate::logic::watched::WatchedList;
use crate::state::types::{Focus, MovieDetail, MovieHit, SessionState};

/// Global application state shared by the event, networking, and UI layers.
///
/// This structure is mutated only from the event loop, in response to input
/// and worker outcomes. The watched list is persisted to disk to preserve the
/// collection across runs.
pub struct AppState {
    /// Current search input text.
    pub input: String,
    /// Caret position (in characters) within the search input.
    /// Always clamped to the range 0..=input.chars().count().
    pub search_caret: usize,
    /// Timestamp of the last input edit; informational only.
    pub last_input_change: Instant,

    // Search session
    /// Result of the search session for the current query.
    pub search: SessionState<Vec<MovieHit>>,
    /// Index into the search results that is currently highlighted.
    pub selected: usize,
    /// List selection state for the results list.
    pub list_state: ListState,
    /// Identifier of the latest query whose outcome may be applied.
    pub latest_query_id: u64,
    /// Next query identifier to allocate.
    pub next_query_id: u64,
    /// Cancellation token of the in-flight search request, if any.
    pub search_cancel: Option<CancelToken>,

    // Detail session
    /// Catalog id currently being inspected, if any.
    pub selected_id: Option<String>,
    /// Result of the detail session for the selected id.
    pub detail: SessionState<MovieDetail>,
    /// Pending (uncommitted) self-assigned rating; 0 means unset.
    pub pending_rating: u8,
    /// Number of times the pending rating was changed for this selection.
    pub rating_revisions: u32,

    // Watched collection
    /// Persisted watched list, loaded once at startup.
    pub watched: WatchedList,
    /// List selection state for the watched pane.
    pub watched_state: ListState,

    /// Which pane is currently focused.
    pub focus: Focus,

    // User settings loaded at startup
    pub layout_left_pct: u16,
    pub layout_right_pct: u16,
}

impl Default for AppState {
    /// Construct a default, empty [`AppState`] with an unwired (in-memory)
    /// watched list; startup replaces it with the file-backed one.
    fn default() -> Self {
        Self {
            input: String::new(),
            search_caret: 0,
            last_input_change: Instant::now(),

            search: SessionState::idle(),
            selected: 0,
            list_state: ListState::default(),
            latest_query_id: 0,
            next_query_id: 1,
            search_cancel: None,

            selected_id: None,
            detail: SessionState::idle(),
            pending_rating: 0,
            rating_revisions: 0,

            watched: WatchedList::default(),
            watched_state: ListState::default(),

            focus: Focus::Search,

            layout_left_pct: 45,
            layout_right_pct: 55,
        }
    }
}

impl AppState {
    /// Search results of the current session, empty while loading or failed.
    pub fn results(&self) -> &[MovieHit] {
        self.search.data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Currently highlighted search result, if any.
    pub fn highlighted_hit(&self) -> Option<&MovieHit> {
        self.results().get(self.selected)
    }

    /// Move the results highlight by `delta`, clamping to the list bounds.
    pub fn move_selection(&mut self, delta: i32) {
        let len = self.results().len();
        if len == 0 {
            return;
        }
        let max = len - 1;
        let next = if delta.is_negative() {
            self.selected.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.selected + delta as usize).min(max)
        };
        self.selected = next;
        self.list_state.select(Some(next));
    }

    /// Move the watched highlight by `delta`, clamping to the list bounds.
    pub fn move_watched_selection(&mut self, delta: i32) {
        let len = self.watched.len();
        if len == 0 {
            self.watched_state.select(None);
            return;
        }
        let current = self.watched_state.selected().unwrap_or(0);
        let next = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (current + delta as usize).min(len - 1)
        };
        self.watched_state.select(Some(next));
    }
}
