use crate::state::MovieHit;
use crate::util::s;

use super::{CatalogConfig, CatalogError};

/// What: Fetch search results for a free-text query from the catalog.
///
/// Inputs:
/// - `cfg`: Catalog endpoint and API key
/// - `query`: Raw query string (trimmed and percent-encoded internally)
///
/// Output:
/// - `Ok(Vec<MovieHit>)` in catalog order on success; `Err(CatalogError::NotFound)`
///   when the catalog reports no match; `Err(CatalogError::Transport)` otherwise.
///
/// Details:
/// - Calls the search endpoint in a blocking task and maps every entry of the
///   `Search` array into a [`MovieHit`], skipping rows without an id.
pub async fn fetch_search(cfg: &CatalogConfig, query: &str) -> Result<Vec<MovieHit>, CatalogError> {
    let url = cfg.search_url(query);

    let resp = tokio::task::spawn_blocking(move || super::curl_json(&url))
        .await
        .map_err(|e| CatalogError::Transport(format!("search task failed: {e}")))??;

    if super::is_not_found(&resp) {
        return Err(CatalogError::NotFound(super::not_found_message(&resp)));
    }

    let mut items: Vec<MovieHit> = Vec::new();
    if let Some(arr) = resp.get("Search").and_then(|v| v.as_array()) {
        for hit in arr {
            let imdb_id = s(hit, "imdbID");
            if imdb_id.is_empty() {
                continue;
            }
            items.push(MovieHit {
                imdb_id,
                title: s(hit, "Title"),
                year: s(hit, "Year"),
                poster_url: s(hit, "Poster"),
            });
        }
    }

    Ok(items)
}
