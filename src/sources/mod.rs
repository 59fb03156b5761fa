//! Remote catalog retrieval module split into submodules.
//!
//! All network access goes through `curl` in a blocking task; callers receive
//! parsed results or a typed [`CatalogError`]. The API key and endpoint are
//! injected via [`CatalogConfig`] so tests can point the client at a shimmed
//! transport.

use crate::util::{curl_args, percent_encode};
use serde_json::Value;
use thiserror::Error;

mod details;
mod search;

pub use details::fetch_detail;
pub use search::fetch_search;

/// Seconds before an outstanding catalog request is abandoned.
const REQUEST_TIMEOUT_SECS: &str = "10";

/// Failure modes of a catalog lookup.
///
/// `NotFound` is the catalog's own "no match" convention (`Response:
/// "False"`) and is recoverable by changing the query; `Transport` covers
/// non-2xx statuses, unreachable hosts, and malformed bodies.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog reported no match: {0}")]
    NotFound(String),
    #[error("catalog request failed: {0}")]
    Transport(String),
}

/// Connection parameters for the catalog service.
///
/// Constructed once from [`crate::config::Settings`] and passed to the fetch
/// workers; never a module-wide global.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl CatalogConfig {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// URL of the free-text search endpoint for `query`.
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/?apikey={}&s={}",
            self.endpoint.trim_end_matches('/'),
            percent_encode(&self.api_key),
            percent_encode(query.trim())
        )
    }

    /// URL of the full-detail endpoint for a catalog id.
    pub fn detail_url(&self, imdb_id: &str) -> String {
        format!(
            "{}/?apikey={}&i={}",
            self.endpoint.trim_end_matches('/'),
            percent_encode(&self.api_key),
            percent_encode(imdb_id)
        )
    }
}

impl From<&crate::config::Settings> for CatalogConfig {
    fn from(settings: &crate::config::Settings) -> Self {
        Self::new(settings.api_key.clone(), settings.endpoint.clone())
    }
}

/// What: Fetch JSON from a URL using curl and parse into `serde_json::Value`.
///
/// Input: `url` HTTP(S) to request
/// Output: `Ok(Value)` on success; `Err(CatalogError::Transport)` if curl
/// fails (including non-2xx statuses via `-f`) or the body is not valid JSON.
///
/// Details: Executes curl with the shared flag set plus a bounded
/// `--max-time`, then parses the UTF-8 body with `serde_json`.
fn curl_json(url: &str) -> Result<Value, CatalogError> {
    let args = curl_args(url, &["--max-time", REQUEST_TIMEOUT_SECS]);
    let out = std::process::Command::new("curl")
        .args(&args)
        .output()
        .map_err(|e| CatalogError::Transport(format!("curl spawn failed: {e}")))?;
    if !out.status.success() {
        return Err(CatalogError::Transport(format!(
            "curl failed: {:?}",
            out.status
        )));
    }
    let body = String::from_utf8(out.stdout)
        .map_err(|e| CatalogError::Transport(format!("non-utf8 body: {e}")))?;
    serde_json::from_str(&body).map_err(|e| CatalogError::Transport(format!("bad json: {e}")))
}

/// True when a parsed catalog body carries the service's own not-found flag.
fn is_not_found(v: &Value) -> bool {
    v.get("Response").and_then(Value::as_str) == Some("False")
}

/// Extract the catalog's error message from a `Response: "False"` body.
fn not_found_message(v: &Value) -> String {
    crate::util::ss(v, &["Error"]).unwrap_or_else(|| "no match".to_string())
}

#[cfg(not(target_os = "windows"))]
#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(not(target_os = "windows"))]
#[cfg(test)]
/// What: Provide a shared mutex to serialize tests that mutate PATH or curl shims.
///
/// Input: None.
/// Output: `&'static Mutex<()>` guard to synchronize tests touching global state.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}

#[cfg(not(target_os = "windows"))]
#[cfg(test)]
/// What: Acquire test mutex lock with automatic poison recovery.
pub(crate) fn lock_test_mutex() -> std::sync::MutexGuard<'static, ()> {
    test_mutex().lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Build search and detail URLs with encoded key, query, and id.
    ///
    /// Inputs:
    /// - A config with a trailing-slash endpoint and a query containing spaces.
    ///
    /// Output:
    /// - URLs with a single slash, encoded query, and the id parameter.
    fn catalog_config_builds_urls() {
        let cfg = CatalogConfig::new("k3y", "https://catalog.test/");
        assert_eq!(
            cfg.search_url(" the matrix "),
            "https://catalog.test/?apikey=k3y&s=the%20matrix"
        );
        assert_eq!(
            cfg.detail_url("tt0133093"),
            "https://catalog.test/?apikey=k3y&i=tt0133093"
        );
    }

    #[test]
    /// What: Detect the catalog's semantic not-found convention.
    ///
    /// Inputs:
    /// - Bodies with `Response: "False"`, `Response: "True"`, and no flag.
    ///
    /// Output:
    /// - Only the first is treated as not-found, with its message extracted.
    fn not_found_detection() {
        let miss: Value = serde_json::json!({"Response": "False", "Error": "Movie not found!"});
        let hit: Value = serde_json::json!({"Response": "True", "Search": []});
        let flat: Value = serde_json::json!({"Title": "Heat"});
        assert!(is_not_found(&miss));
        assert!(!is_not_found(&hit));
        assert!(!is_not_found(&flat));
        assert_eq!(not_found_message(&miss), "Movie not found!");
    }
}
