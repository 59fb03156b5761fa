//! Core data types shared by the event, networking, and UI layers.

use serde::{Deserialize, Serialize};

use crate::logic::search_session::CancelToken;

/// Phase of an asynchronous fetch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No input value is being resolved.
    #[default]
    Idle,
    /// A request for the current input value is in flight.
    Loading,
    /// The most recent request resolved with data.
    Success,
    /// The most recent request failed with a user-facing message.
    Failure,
}

/// Result of a fetch session, published to the UI as a read-only snapshot.
///
/// Exactly one of the following holds at any time: `Success` with data and no
/// error, `Failure` with an error and no data, or `Idle`/`Loading` with
/// neither. The fields are private and only the constructors below can build
/// a value, so an inconsistent combination cannot be observed.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState<T> {
    status: SessionStatus,
    data: Option<T>,
    error: Option<String>,
}

impl<T> SessionState<T> {
    /// Session with no input value; no request issued.
    pub fn idle() -> Self {
        Self {
            status: SessionStatus::Idle,
            data: None,
            error: None,
        }
    }

    /// Session with a request in flight; any previous error is cleared.
    pub fn loading() -> Self {
        Self {
            status: SessionStatus::Loading,
            data: None,
            error: None,
        }
    }

    /// Session resolved with data.
    pub fn success(data: T) -> Self {
        Self {
            status: SessionStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Session resolved with a user-facing failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: SessionStatus::Failure,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T> Default for SessionState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// One search result row as returned by the catalog, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieHit {
    /// Catalog identifier (imdb id), unique per title.
    pub imdb_id: String,
    pub title: String,
    /// Release year as served by the catalog (kept as text: ranges like
    /// `"2008–2013"` appear for series).
    pub year: String,
    pub poster_url: String,
}

/// A third-party rating attached to a detail record (e.g. Rotten Tomatoes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingSource {
    pub source: String,
    pub value: String,
}

/// Full detail record for one title, keyed by catalog id.
///
/// Immutable once fetched for a given id; a new id means a new fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub released: String,
    /// Raw catalog runtime, e.g. `"148 min"`.
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub box_office: String,
    pub poster_url: String,
    /// Catalog rating on a 0–10 scale; `0.0` when the catalog has none.
    pub imdb_rating: f64,
    pub ratings: Vec<RatingSource>,
}

impl MovieDetail {
    /// Runtime in whole minutes, `0` when the catalog value is unparsable.
    pub fn runtime_minutes(&self) -> u32 {
        crate::util::runtime_minutes(&self.runtime).unwrap_or(0)
    }
}

/// Persisted watched-list entry, created on explicit "add to list".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    /// Catalog rating captured at add time.
    pub imdb_rating: f64,
    pub runtime_minutes: u32,
    /// Self-assigned rating, 1–10.
    pub user_rating: u8,
    /// How many times the rating was changed before the add was confirmed.
    pub rating_revisions: u32,
}

/// A search request tagged with the query generation that issued it.
///
/// The event loop only applies an outcome whose `id` still matches
/// `AppState::latest_query_id`; the token lets the worker skip work for a
/// request that was superseded while queued or in flight.
#[derive(Debug, Clone)]
pub struct QueryInput {
    pub id: u64,
    pub text: String,
    pub cancel: CancelToken,
}

/// Which pane currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Query input plus results list.
    #[default]
    Search,
    /// Detail pane for the selected title (rating keys active).
    Details,
    /// Watched list pane.
    Watched,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Verify `SessionState` constructors never produce an inconsistent
    /// status/data/error combination.
    ///
    /// Inputs:
    /// - All four constructors for a `SessionState<Vec<i32>>`.
    ///
    /// Output:
    /// - `Success` carries data and no error, `Failure` the reverse, and
    ///   `Idle`/`Loading` carry neither.
    fn session_state_invariants() {
        let idle: SessionState<Vec<i32>> = SessionState::idle();
        assert_eq!(idle.status(), SessionStatus::Idle);
        assert!(idle.data().is_none() && idle.error().is_none());

        let loading: SessionState<Vec<i32>> = SessionState::loading();
        assert_eq!(loading.status(), SessionStatus::Loading);
        assert!(loading.data().is_none() && loading.error().is_none());

        let ok = SessionState::success(vec![1, 2]);
        assert_eq!(ok.status(), SessionStatus::Success);
        assert_eq!(ok.data(), Some(&vec![1, 2]));
        assert!(ok.error().is_none());

        let bad: SessionState<Vec<i32>> = SessionState::failure("boom");
        assert_eq!(bad.status(), SessionStatus::Failure);
        assert!(bad.data().is_none());
        assert_eq!(bad.error(), Some("boom"));
    }

    #[test]
    /// What: Parse detail runtime strings through `runtime_minutes`.
    ///
    /// Inputs:
    /// - Detail records with a normal runtime and an `"N/A"` placeholder.
    ///
    /// Output:
    /// - Minutes for the former, `0` for the latter.
    fn detail_runtime_minutes_degrades_to_zero() {
        let mut d = MovieDetail {
            runtime: "148 min".into(),
            ..Default::default()
        };
        assert_eq!(d.runtime_minutes(), 148);
        d.runtime = "N/A".into();
        assert_eq!(d.runtime_minutes(), 0);
    }

    #[test]
    /// What: Round-trip a `WatchedEntry` through serde_json with all fields intact.
    ///
    /// Inputs:
    /// - A fully-populated entry.
    ///
    /// Output:
    /// - Deserialized value equals the original.
    fn watched_entry_serde_round_trip() {
        let entry = WatchedEntry {
            imdb_id: "tt1375666".into(),
            title: "Inception".into(),
            year: "2010".into(),
            poster_url: "https://img.example/inception.jpg".into(),
            imdb_rating: 8.8,
            runtime_minutes: 148,
            user_rating: 9,
            rating_revisions: 2,
        };
        let body = serde_json::to_string(&entry).unwrap();
        let back: WatchedEntry = serde_json::from_str(&body).unwrap();
        assert_eq!(back, entry);
    }
}
