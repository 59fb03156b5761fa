//! Aggregate statistics over the watched collection.

use crate::state::WatchedEntry;

/// Mean of a numeric projection over `items`; `0.0` for an empty slice.
pub fn mean_by<T>(items: &[T], f: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(f).sum::<f64>() / items.len() as f64
}

/// Round half away from zero to `decimals` places for display.
fn round_to(value: f64, decimals: i32) -> f64 {
    let k = 10f64.powi(decimals);
    (value * k).round() / k
}

/// Display-ready aggregates for the watched pane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    /// Mean catalog rating, rounded to 2 decimals.
    pub avg_imdb_rating: f64,
    /// Mean self-assigned rating, rounded to 2 decimals.
    pub avg_user_rating: f64,
    /// Mean runtime in minutes, rounded to 1 decimal.
    pub avg_runtime_minutes: f64,
}

/// What: Compute the watched-pane summary block.
///
/// Inputs:
/// - `entries`: Current watched collection.
///
/// Output:
/// - Counts and means; all means are `0.0` for an empty collection.
pub fn watched_summary(entries: &[WatchedEntry]) -> WatchedSummary {
    WatchedSummary {
        count: entries.len(),
        avg_imdb_rating: round_to(mean_by(entries, |e| e.imdb_rating), 2),
        avg_user_rating: round_to(mean_by(entries, |e| f64::from(e.user_rating)), 2),
        avg_runtime_minutes: round_to(mean_by(entries, |e| f64::from(e.runtime_minutes)), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(imdb: f64, user: u8, minutes: u32) -> WatchedEntry {
        WatchedEntry {
            imdb_id: format!("tt{minutes}"),
            title: String::new(),
            year: String::new(),
            poster_url: String::new(),
            imdb_rating: imdb,
            runtime_minutes: minutes,
            user_rating: user,
            rating_revisions: 0,
        }
    }

    #[test]
    /// What: Means over an empty collection are zero, not NaN.
    ///
    /// Inputs:
    /// - An empty entry slice.
    ///
    /// Output:
    /// - All aggregates are exactly `0.0` and finite.
    fn empty_collection_means_zero() {
        let summary = watched_summary(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_imdb_rating, 0.0);
        assert_eq!(summary.avg_user_rating, 0.0);
        assert_eq!(summary.avg_runtime_minutes, 0.0);
        assert!(summary.avg_imdb_rating.is_finite());
    }

    #[test]
    /// What: Means are computed over all entries with display rounding.
    ///
    /// Inputs:
    /// - Three entries with known ratings and runtimes.
    ///
    /// Output:
    /// - Ratings rounded to 2 decimals, runtime to 1.
    fn means_round_for_display() {
        let entries = vec![entry(8.8, 9, 148), entry(7.4, 6, 90), entry(9.0, 10, 152)];
        let summary = watched_summary(&entries);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.avg_imdb_rating, 8.4);
        assert_eq!(summary.avg_user_rating, 8.33);
        assert_eq!(summary.avg_runtime_minutes, 130.0);
    }

    #[test]
    /// What: `mean_by` handles an arbitrary projection.
    ///
    /// Inputs:
    /// - Plain integers projected through a doubling closure.
    ///
    /// Output:
    /// - Mean of the projected values.
    fn mean_by_projection() {
        let xs = [1u32, 2, 3];
        assert_eq!(mean_by(&xs, |x| f64::from(*x) * 2.0), 4.0);
        let none: [u32; 0] = [];
        assert_eq!(mean_by(&none, |x| f64::from(*x)), 0.0);
    }
}
