//! Detail session controller.
//!
//! Owns the lifecycle of "fetch full detail for a selected id" plus the small
//! rating state that lives inside that session: the pending (uncommitted)
//! star rating and the count of rating revisions made before the add is
//! confirmed. There is no cancellation token here; rapid re-selection is
//! tolerated by keying every outcome to the currently selected id.

use tokio::sync::mpsc;

use crate::sources::{CatalogConfig, CatalogError};
use crate::state::{AppState, MovieDetail, SessionState, WatchedEntry};

use super::search_session::MSG_TRANSPORT;

/// Outcome of one detail fetch, tagged with the id it was requested for.
#[derive(Debug)]
pub struct DetailOutcome {
    pub imdb_id: String,
    pub result: Result<MovieDetail, CatalogError>,
}

/// What: Change the selected title, starting or ending a detail session.
///
/// Inputs:
/// - `app`: Mutable application state
/// - `id`: `Some` catalog id to inspect, `None` to close the session
/// - `details_tx`: Channel to the detail worker
///
/// Output:
/// - Mutates the detail session; sends at most one fetch request.
///
/// Details:
/// - Selecting the already-selected id closes the session (toggle).
/// - Every selection change resets the pending rating and its revision
///   counter to zero.
pub fn select(
    app: &mut AppState,
    id: Option<String>,
    details_tx: &mpsc::UnboundedSender<String>,
) {
    let id = match id {
        Some(id) if app.selected_id.as_deref() == Some(id.as_str()) => None,
        other => other,
    };

    app.pending_rating = 0;
    app.rating_revisions = 0;

    match id {
        None => {
            app.selected_id = None;
            app.detail = SessionState::idle();
        }
        Some(id) => {
            tracing::debug!(imdb_id = %id, "fetching detail");
            app.selected_id = Some(id.clone());
            app.detail = SessionState::loading();
            let _ = details_tx.send(id);
        }
    }
}

/// What: Apply a worker outcome to the detail session.
///
/// Inputs:
/// - `app`: Mutable application state
/// - `outcome`: Fetch result tagged with the id it served
///
/// Output:
/// - Mutates `app.detail` only when the outcome's id is still selected.
///
/// Details:
/// - A response for an abandoned id is discarded with no state transition;
///   only the latest selection may mutate state.
pub fn apply_detail_outcome(app: &mut AppState, outcome: DetailOutcome) {
    if app.selected_id.as_deref() != Some(outcome.imdb_id.as_str()) {
        tracing::debug!(imdb_id = %outcome.imdb_id, "discarding stale detail response");
        return;
    }

    app.detail = match outcome.result {
        Ok(detail) => SessionState::success(detail),
        Err(e) => {
            tracing::warn!(imdb_id = %outcome.imdb_id, error = %e, "detail fetch failed");
            SessionState::failure(MSG_TRANSPORT)
        }
    };
}

/// What: Record a change of the pending (uncommitted) user rating.
///
/// Inputs:
/// - `app`: Mutable application state
/// - `value`: New rating, clamped to 1–10
///
/// Output:
/// - Updates `pending_rating`; bumps `rating_revisions` when the value
///   actually changed.
pub fn set_pending_rating(app: &mut AppState, value: u8) {
    let value = value.clamp(1, 10);
    if value == app.pending_rating {
        return;
    }
    app.pending_rating = value;
    app.rating_revisions += 1;
}

/// What: Confirm "add to watched" for the current detail session.
///
/// Inputs:
/// - `app`: Mutable application state
///
/// Output:
/// - `true` when an entry was added; `false` when preconditions fail
///   (unresolved detail, no rating yet, or id already watched).
///
/// Details:
/// - Builds the [`WatchedEntry`] from the resolved detail, capturing the
///   revision counter, delegates to the store, then ends the session by
///   clearing the selection.
pub fn confirm_add(app: &mut AppState) -> bool {
    let Some(detail) = app.detail.data() else {
        return false;
    };
    if app.pending_rating == 0 || app.watched.contains(&detail.imdb_id) {
        return false;
    }

    let entry = WatchedEntry {
        imdb_id: detail.imdb_id.clone(),
        title: detail.title.clone(),
        year: detail.year.clone(),
        poster_url: detail.poster_url.clone(),
        imdb_rating: detail.imdb_rating,
        runtime_minutes: detail.runtime_minutes(),
        user_rating: app.pending_rating,
        rating_revisions: app.rating_revisions,
    };
    let added = app.watched.add(entry);

    if added {
        app.selected_id = None;
        app.detail = SessionState::idle();
        app.pending_rating = 0;
        app.rating_revisions = 0;
    }
    added
}

/// What: Background worker resolving detail requests against the catalog.
///
/// Inputs:
/// - `cfg`: Catalog connection parameters
/// - `detail_rx`: Incoming catalog ids
/// - `outcome_tx`: Channel back to the event loop
///
/// Output:
/// - Runs until the request channel closes.
///
/// Details:
/// - Coalesces queued requests to the newest id so one selection is resolved
///   at a time; the outcome's id lets the event loop drop abandoned fetches.
pub async fn run_detail_worker(
    cfg: CatalogConfig,
    mut detail_rx: mpsc::UnboundedReceiver<String>,
    outcome_tx: mpsc::UnboundedSender<DetailOutcome>,
) {
    while let Some(mut imdb_id) = detail_rx.recv().await {
        while let Ok(newer) = detail_rx.try_recv() {
            imdb_id = newer;
        }
        let result = crate::sources::fetch_detail(&cfg, &imdb_id).await;
        if outcome_tx.send(DetailOutcome { imdb_id, result }).is_err() {
            break;
        }
    }
}
