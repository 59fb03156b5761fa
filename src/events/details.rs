//! Key handling for the details pane: rating and confirming the add.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::logic::detail_session;
use crate::state::{AppState, Focus};

/// What: Handle a key press while the details pane is focused.
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
/// - Digits set the pending rating (`0` means 10); `a` or Enter confirms the
///   add when allowed; Esc closes the session and returns to search.
pub fn handle_details_key(
    ke: KeyEvent,
    app: &mut AppState,
    details_tx: &mpsc::UnboundedSender<String>,
) -> bool {
    match ke.code {
        KeyCode::Char(c @ '1'..='9') => {
            detail_session::set_pending_rating(app, c as u8 - b'0');
        }
        KeyCode::Char('0') => {
            detail_session::set_pending_rating(app, 10);
        }
        KeyCode::Char('a') | KeyCode::Enter => {
            if detail_session::confirm_add(app) {
                app.focus = Focus::Search;
            }
        }
        KeyCode::Esc => {
            detail_session::select(app, None, details_tx);
            app.focus = Focus::Search;
        }
        KeyCode::Tab => app.focus = Focus::Watched,
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::detail_session::{DetailOutcome, apply_detail_outcome, select};
    use crate::state::MovieDetail;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn resolved_app(id: &str) -> (AppState, mpsc::UnboundedSender<String>) {
        let mut app = AppState {
            focus: Focus::Details,
            ..Default::default()
        };
        let (dtx, _drx) = mpsc::unbounded_channel();
        select(&mut app, Some(id.into()), &dtx);
        apply_detail_outcome(
            &mut app,
            DetailOutcome {
                imdb_id: id.into(),
                result: Ok(MovieDetail {
                    imdb_id: id.into(),
                    title: "Heat".into(),
                    runtime: "170 min".into(),
                    imdb_rating: 8.3,
                    ..Default::default()
                }),
            },
        );
        (app, dtx)
    }

    #[test]
    /// What: Digit keys set the pending rating, with `0` meaning 10.
    ///
    /// Inputs:
    /// - Keys `3`, `7`, `0` in order.
    ///
    /// Output:
    /// - Pending rating ends at 10 after three revisions.
    fn digits_set_rating() {
        let (mut app, dtx) = resolved_app("tt0113277");
        handle_details_key(key(KeyCode::Char('3')), &mut app, &dtx);
        handle_details_key(key(KeyCode::Char('7')), &mut app, &dtx);
        handle_details_key(key(KeyCode::Char('0')), &mut app, &dtx);
        assert_eq!(app.pending_rating, 10);
        assert_eq!(app.rating_revisions, 3);
    }

    #[test]
    /// What: Confirming with `a` adds the entry and returns focus to search.
    ///
    /// Inputs:
    /// - A resolved detail rated 8, then `a`.
    ///
    /// Output:
    /// - One watched entry; focus back on the search pane.
    fn add_confirms_and_returns_to_search() {
        let (mut app, dtx) = resolved_app("tt0113277");
        handle_details_key(key(KeyCode::Char('8')), &mut app, &dtx);
        handle_details_key(key(KeyCode::Char('a')), &mut app, &dtx);
        assert_eq!(app.watched.len(), 1);
        assert_eq!(app.focus, Focus::Search);
        assert!(app.selected_id.is_none());
    }

    #[test]
    /// What: Confirming without a rating is refused and keeps the session.
    ///
    /// Inputs:
    /// - Enter on a resolved detail with no rating set.
    ///
    /// Output:
    /// - No entry added; focus stays on details.
    fn add_without_rating_is_refused() {
        let (mut app, dtx) = resolved_app("tt0113277");
        handle_details_key(key(KeyCode::Enter), &mut app, &dtx);
        assert!(app.watched.is_empty());
        assert_eq!(app.focus, Focus::Details);
        assert!(app.selected_id.is_some());
    }

    #[test]
    /// What: Esc ends the session and returns to the search pane.
    ///
    /// Inputs:
    /// - Esc with an open session.
    ///
    /// Output:
    /// - Selection cleared, focus on search.
    fn esc_closes_session() {
        let (mut app, dtx) = resolved_app("tt0113277");
        handle_details_key(key(KeyCode::Esc), &mut app, &dtx);
        assert!(app.selected_id.is_none());
        assert_eq!(app.focus, Focus::Search);
    }
}
