//! Key handling for the search pane: query editing and result selection.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::logic::{detail_session, search_session};
use crate::state::{AppState, Focus, QueryInput};

/// What: Handle a key press while the search pane is focused.
///
/// Inputs:
/// - `ke`: Key event
/// - `app`: Mutable application state
/// - `query_tx`: Channel to the search worker
/// - `details_tx`: Channel to the detail worker
///
/// Output:
/// - `true` to exit the application; otherwise `false`.
///
/// Details:
/// - Printable characters edit the query at the caret and re-issue the
///   search; arrows move the result highlight; Enter opens the highlighted
///   title; Esc closes an open detail session first and exits otherwise.
pub fn handle_search_key(
    ke: KeyEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
    details_tx: &mpsc::UnboundedSender<String>,
) -> bool {
    match ke.code {
        KeyCode::Char(c) => {
            insert_at_caret(app, c);
            app.last_input_change = std::time::Instant::now();
            search_session::submit_query(app, query_tx);
        }
        KeyCode::Backspace => {
            if remove_before_caret(app) {
                app.last_input_change = std::time::Instant::now();
                search_session::submit_query(app, query_tx);
            }
        }
        KeyCode::Delete => {
            if remove_at_caret(app) {
                app.last_input_change = std::time::Instant::now();
                search_session::submit_query(app, query_tx);
            }
        }
        KeyCode::Left => {
            app.search_caret = app.search_caret.saturating_sub(1);
        }
        KeyCode::Right => {
            app.search_caret = (app.search_caret + 1).min(app.input.chars().count());
        }
        KeyCode::Home => app.search_caret = 0,
        KeyCode::End => app.search_caret = app.input.chars().count(),
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::Enter => {
            if let Some(hit) = app.highlighted_hit() {
                let id = hit.imdb_id.clone();
                detail_session::select(app, Some(id), details_tx);
                if app.selected_id.is_some() {
                    app.focus = Focus::Details;
                }
            }
        }
        KeyCode::Tab => app.focus = Focus::Watched,
        KeyCode::Esc => {
            if app.selected_id.is_some() {
                detail_session::select(app, None, details_tx);
            } else {
                return true;
            }
        }
        _ => {}
    }
    false
}

/// Insert `c` at the caret, advancing it by one character.
fn insert_at_caret(app: &mut AppState, c: char) {
    let byte_idx = byte_index(&app.input, app.search_caret);
    app.input.insert(byte_idx, c);
    app.search_caret += 1;
}

/// Remove the character before the caret; `false` when at the start.
fn remove_before_caret(app: &mut AppState) -> bool {
    if app.search_caret == 0 {
        return false;
    }
    let byte_idx = byte_index(&app.input, app.search_caret - 1);
    app.input.remove(byte_idx);
    app.search_caret -= 1;
    true
}

/// Remove the character at the caret; `false` when at the end.
fn remove_at_caret(app: &mut AppState) -> bool {
    if app.search_caret >= app.input.chars().count() {
        return false;
    }
    let byte_idx = byte_index(&app.input, app.search_caret);
    app.input.remove(byte_idx);
    true
}

/// Byte offset of the `char_idx`-th character of `s`.
fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
