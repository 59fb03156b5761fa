use crate::state::{MovieDetail, RatingSource};
use crate::util::{f64_of, s};

use super::{CatalogConfig, CatalogError};

/// What: Fetch the full detail record for a catalog id.
///
/// Inputs:
/// - `cfg`: Catalog endpoint and API key
/// - `imdb_id`: Catalog identifier of the selected title
///
/// Output:
/// - `Ok(MovieDetail)` on success; `Err(CatalogError::NotFound)` when the
///   catalog does not know the id; `Err(CatalogError::Transport)` otherwise.
///
/// Details:
/// - The catalog serves a flat record with stringly-typed numbers; parsing is
///   lenient and degrades missing values to empty strings / `0.0` so a sparse
///   record never fails the fetch.
pub async fn fetch_detail(cfg: &CatalogConfig, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
    let url = cfg.detail_url(imdb_id);

    let resp = tokio::task::spawn_blocking(move || super::curl_json(&url))
        .await
        .map_err(|e| CatalogError::Transport(format!("detail task failed: {e}")))??;

    if super::is_not_found(&resp) {
        return Err(CatalogError::NotFound(super::not_found_message(&resp)));
    }

    let mut ratings: Vec<RatingSource> = Vec::new();
    if let Some(arr) = resp.get("Ratings").and_then(|v| v.as_array()) {
        for r in arr {
            let source = s(r, "Source");
            let value = s(r, "Value");
            if source.is_empty() && value.is_empty() {
                continue;
            }
            ratings.push(RatingSource { source, value });
        }
    }

    Ok(MovieDetail {
        imdb_id: {
            let id = s(&resp, "imdbID");
            if id.is_empty() {
                imdb_id.to_string()
            } else {
                id
            }
        },
        title: s(&resp, "Title"),
        year: s(&resp, "Year"),
        released: s(&resp, "Released"),
        runtime: s(&resp, "Runtime"),
        genre: s(&resp, "Genre"),
        director: s(&resp, "Director"),
        writer: s(&resp, "Writer"),
        actors: s(&resp, "Actors"),
        plot: s(&resp, "Plot"),
        language: s(&resp, "Language"),
        box_office: s(&resp, "BoxOffice"),
        poster_url: s(&resp, "Poster"),
        imdb_rating: f64_of(&resp, "imdbRating").unwrap_or(0.0),
        ratings,
    })
}
