//! Key handling for the watched pane: navigation and removal.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::logic::detail_session;
use crate::state::{AppState, Focus};

/// What: Handle a key press while the watched pane is focused.
///
/// Inputs:
/// - `ke`: Key event
/// - `app`: Mutable application state
/// - `details_tx`: Channel to the detail worker
///
/// Output:
/// - `true` to exit the application; otherwise `false`.
///
/// Details:
/// - Arrows move the highlight; `d`/Delete removes the highlighted entry;
///   Enter re-opens the entry's detail record; Tab/Esc return to search.
pub fn handle_watched_key(
    ke: KeyEvent,
    app: &mut AppState,
    details_tx: &mpsc::UnboundedSender<String>,
) -> bool {
    match ke.code {
        KeyCode::Up => app.move_watched_selection(-1),
        KeyCode::Down => app.move_watched_selection(1),
        KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
            if let Some(idx) = app.watched_state.selected()
                && let Some(entry) = app.watched.entries().get(idx)
            {
                let id = entry.imdb_id.clone();
                app.watched.remove(&id);
                let len = app.watched.len();
                app.watched_state.select(if len == 0 {
                    None
                } else {
                    Some(idx.min(len - 1))
                });
            }
        }
        KeyCode::Enter => {
            if let Some(idx) = app.watched_state.selected()
                && let Some(entry) = app.watched.entries().get(idx)
            {
                let id = entry.imdb_id.clone();
                detail_session::select(app, Some(id), details_tx);
                if app.selected_id.is_some() {
                    app.focus = Focus::Details;
                }
            }
        }
        KeyCode::Tab | KeyCode::Esc => app.focus = Focus::Search,
        _ => {}
    }
    false
}
