//! Core non-UI logic split into modular submodules.

pub mod detail_session;
pub mod search_session;
pub mod summary;
pub mod watched;

// Re-export the most commonly used APIs to keep import paths short
pub use detail_session::{DetailOutcome, apply_detail_outcome, confirm_add, select};
pub use search_session::{SearchOutcome, apply_search_outcome, submit_query};
pub use summary::watched_summary;
pub use watched::{JsonFileRepository, ListRepository, PersistedList, WatchedList};
