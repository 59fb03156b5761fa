//! Modularized state module.
//!
//! Splits the application state into small files while preserving a flat
//! public API under `crate::state::*` via re-exports.

pub mod app_state;
pub mod types;

// Public re-exports to keep import paths short
pub use app_state::AppState;
pub use types::{
    Focus, MovieDetail, MovieHit, QueryInput, RatingSource, SessionState, SessionStatus,
    WatchedEntry,
};
