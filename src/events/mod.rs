//! Event handling layer for the TUI.
//!
//! This module re-exports `handle_event` and delegates pane-specific logic to
//! submodules to keep files small.

use crossterm::event::{Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::state::{AppState, Focus, QueryInput};

mod details;
mod search;
mod watched;

/// What: Dispatch a single terminal event and mutate the [`AppState`].
///
/// Inputs:
/// - `ev`: Terminal event (key presses are handled, everything else ignored)
/// - `app`: Mutable application state
/// - `query_tx`: Channel to send search queries
/// - `details_tx`: Channel to request title details
///
/// Output:
/// - `true` to signal the application should exit; otherwise `false`.
///
/// Details:
/// - Ctrl+C always exits. Tab cycles between the search and watched panes;
///   the details pane is entered by selecting a result and left with Esc or
///   by confirming the add.
pub fn handle_event(
    ev: CEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
    details_tx: &mpsc::UnboundedSender<String>,
) -> bool {
    let CEvent::Key(ke) = ev else {
        return false;
    };
    if ke.kind != KeyEventKind::Press {
        return false;
    }

    if ke.modifiers.contains(KeyModifiers::CONTROL) && ke.code == KeyCode::Char('c') {
        return true;
    }

    match app.focus {
        Focus::Search => search::handle_search_key(ke, app, query_tx, details_tx),
        Focus::Details => details::handle_details_key(ke, app, details_tx),
        Focus::Watched => watched::handle_watched_key(ke, app, details_tx),
    }
}
