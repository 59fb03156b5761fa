//! Search session controller.
//!
//! Owns the lifecycle of "search by query": every input edit allocates a new
//! query generation, cancels the superseded request, and either short-circuits
//! (short queries) or hands the fetch to the background worker. Responses are
//! applied only when their generation still matches `latest_query_id`, so a
//! stale response can never mutate state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use crate::sources::{CatalogConfig, CatalogError};
use crate::state::{AppState, MovieHit, QueryInput, SessionState};

/// User-facing message when the catalog reports no match for the query.
pub const MSG_NOT_FOUND: &str = "Movie not found !";
/// User-facing message for transport-level failures.
pub const MSG_TRANSPORT: &str = "Something went wrong";

/// Queries shorter than this never reach the network.
const MIN_QUERY_LEN: usize = 3;

/// Cooperative cancellation flag scoped to one request.
///
/// Cancellation is advisory: the worker checks the flag before and after the
/// fetch, but the generation check in [`apply_search_outcome`] is what
/// guarantees a late response is discarded.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of one search fetch, tagged with the query generation it served.
#[derive(Debug)]
pub struct SearchOutcome {
    pub query_id: u64,
    pub result: Result<Vec<MovieHit>, CatalogError>,
}

/// What: React to a change of the query input.
///
/// Inputs:
/// - `app`: Mutable application state (current `input` is the new query)
/// - `query_tx`: Channel to the search worker
///
/// Output:
/// - Mutates the search session state; sends at most one [`QueryInput`].
///
/// Details:
/// - Always allocates a fresh query id and cancels the previous in-flight
///   token, so a response for the old query cannot be applied even if the
///   worker already picked it up.
/// - Queries with fewer than three characters resolve immediately to an empty
///   success (declared input-validation short-circuit, not an error) with no
///   network call and no loading flicker.
pub fn submit_query(app: &mut AppState, query_tx: &mpsc::UnboundedSender<QueryInput>) {
    let id = app.next_query_id;
    app.next_query_id += 1;
    app.latest_query_id = id;

    if let Some(token) = app.search_cancel.take() {
        token.cancel();
    }

    let query = app.input.trim().to_string();
    if query.chars().count() < MIN_QUERY_LEN {
        app.search = SessionState::success(Vec::new());
        app.selected = 0;
        app.list_state.select(None);
        return;
    }

    app.search = SessionState::loading();
    let cancel = CancelToken::new();
    app.search_cancel = Some(cancel.clone());
    tracing::debug!(query_id = id, query = %query, "issuing search");
    let _ = query_tx.send(QueryInput {
        id,
        text: query,
        cancel,
    });
}

/// What: Apply a worker outcome to the search session.
///
/// Inputs:
/// - `app`: Mutable application state
/// - `outcome`: Fetch result tagged with its query generation
///
/// Output:
/// - Mutates `app.search` only when the outcome belongs to the latest query.
///
/// Details:
/// - A superseded outcome is discarded with no state transition at all; only
///   the request for the current query value may mutate state.
/// - The catalog's own "no match" answer and transport failures map to the
///   two fixed user-facing messages.
pub fn apply_search_outcome(app: &mut AppState, outcome: SearchOutcome) {
    if outcome.query_id != app.latest_query_id {
        tracing::debug!(
            query_id = outcome.query_id,
            latest = app.latest_query_id,
            "discarding stale search response"
        );
        return;
    }
    app.search_cancel = None;

    app.search = match outcome.result {
        Ok(hits) => SessionState::success(hits),
        Err(CatalogError::NotFound(reason)) => {
            tracing::debug!(%reason, "search reported no match");
            SessionState::failure(MSG_NOT_FOUND)
        }
        Err(CatalogError::Transport(reason)) => {
            tracing::warn!(%reason, "search transport failure");
            SessionState::failure(MSG_TRANSPORT)
        }
    };

    app.selected = 0;
    let has_results = app
        .search
        .data()
        .map(|hits| !hits.is_empty())
        .unwrap_or(false);
    app.list_state.select(if has_results { Some(0) } else { None });
}

/// What: Cancel any outstanding search request at session teardown.
///
/// Inputs:
/// - `app`: Mutable application state
///
/// Output:
/// - The in-flight token (if any) is cancelled; no state mutation can follow
///   because the event loop stops draining outcomes.
pub fn teardown(app: &mut AppState) {
    if let Some(token) = app.search_cancel.take() {
        token.cancel();
    }
}

/// What: Background worker resolving search requests against the catalog.
///
/// Inputs:
/// - `cfg`: Catalog connection parameters
/// - `query_rx`: Incoming query requests
/// - `outcome_tx`: Channel back to the event loop
///
/// Output:
/// - Runs until the request channel closes.
///
/// Details:
/// - Coalesces queued requests to the newest one, then skips work whose token
///   was cancelled before or during the fetch. One request is in flight at a
///   time.
pub async fn run_search_worker(
    cfg: CatalogConfig,
    mut query_rx: mpsc::UnboundedReceiver<QueryInput>,
    outcome_tx: mpsc::UnboundedSender<SearchOutcome>,
) {
    while let Some(mut req) = query_rx.recv().await {
        // Collapse any backlog so only the newest query is fetched
        while let Ok(newer) = query_rx.try_recv() {
            req = newer;
        }
        if req.cancel.is_cancelled() {
            continue;
        }
        let result = crate::sources::fetch_search(&cfg, &req.text).await;
        if req.cancel.is_cancelled() {
            tracing::debug!(query_id = req.id, "dropping cancelled search response");
            continue;
        }
        if outcome_tx
            .send(SearchOutcome {
                query_id: req.id,
                result,
            })
            .is_err()
        {
            break;
        }
    }
}
