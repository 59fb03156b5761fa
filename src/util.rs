//! Small utility helpers for URL encoding, JSON field extraction, and catalog
//! number parsing.
//!
//! The functions in this module are intentionally lightweight and
//! dependency-free to keep hot paths fast. They are used by the networking
//! layer and by the session controllers.
use serde_json::Value;

/// Percent-encode a string for use in URLs.
///
/// Encoding rules:
///
/// - Unreserved characters as per RFC 3986 (`A-Z`, `a-z`, `0-9`, `-`, `.`, `_`, `~`)
///   are left as-is.
/// - Space is encoded as `%20` (not `+`).
/// - All other bytes are encoded as two uppercase hexadecimal digits prefixed by `%`.
///
/// The function operates on raw bytes from the input string. Any non-ASCII bytes
/// are hex-escaped.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}

/// Extract a string value from a JSON object by key, defaulting to empty string.
///
/// Returns `""` if the key is missing or not a string. The catalog uses the
/// literal string `"N/A"` for absent fields; that value is passed through
/// unchanged so the presentation layer can decide how to render it.
pub fn s(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Extract the first available string from a list of candidate keys.
///
/// Returns `Some(String)` for the first key that maps to a JSON string, or `None`
/// if none match.
pub fn ss(v: &Value, keys: &[&str]) -> Option<String> {
    for k in keys {
        if let Some(s) = v.get(*k).and_then(|x| x.as_str()) {
            return Some(s.to_owned());
        }
    }
    None
}

/// Parse a numeric field that the catalog serves as a JSON string.
///
/// Accepts a real JSON number or a string that parses as `f64`. The catalog's
/// `"N/A"` placeholder (and anything else unparsable) yields `None`.
pub fn f64_of(v: &Value, key: &str) -> Option<f64> {
    let n = v.get(key)?;
    if let Some(f) = n.as_f64() {
        return Some(f);
    }
    n.as_str().and_then(|s| s.trim().parse::<f64>().ok())
}

/// Parse a catalog runtime string such as `"148 min"` into whole minutes.
///
/// Only the leading integer is considered; `"N/A"`, empty strings, and other
/// unparsable values yield `None`.
pub fn runtime_minutes(raw: &str) -> Option<u32> {
    raw.trim()
        .split_whitespace()
        .next()
        .and_then(|tok| tok.parse::<u32>().ok())
}

/// Build curl command arguments for fetching a URL.
///
/// Inputs:
/// - `url`: The URL to fetch
/// - `extra_args`: Additional curl arguments (e.g., `["--max-time", "10"]`)
///
/// Output:
/// - Vector of curl arguments ready to pass to `Command::args()`
///
/// Details:
/// - Base arguments: `-sSLf` (silent, show errors, follow redirects, fail on HTTP errors)
/// - Windows: Adds `-k` to skip SSL verification
/// - Appends `extra_args` and `url` at the end
pub fn curl_args(url: &str, extra_args: &[&str]) -> Vec<String> {
    let mut args = vec!["-sSLf".to_string()];

    #[cfg(target_os = "windows")]
    {
        // Skip SSL certificate verification on Windows to avoid exit code 77
        args.push("-k".to_string());
    }

    for arg in extra_args {
        args.push((*arg).to_string());
    }

    // URL goes last
    args.push(url.to_string());

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Verify that percent encoding preserves unreserved characters and escapes reserved ones.
    ///
    /// Inputs:
    /// - Sample strings covering empty input, ASCII safe set, spaces, and unicode.
    ///
    /// Output:
    /// - Encoded results match RFC 3986 expectations for each case.
    fn util_percent_encode() {
        assert_eq!(percent_encode(""), "");
        assert_eq!(percent_encode("abc-_.~"), "abc-_.~");
        assert_eq!(percent_encode("the dark knight"), "the%20dark%20knight");
        assert_eq!(percent_encode("8½"), "8%C2%BD");
        assert_eq!(percent_encode("se7en?"), "se7en%3F");
    }

    #[test]
    /// What: Validate JSON helper extractors across strings and numeric strings.
    ///
    /// Inputs:
    /// - Composite JSON value with strings, numbers-as-strings, and `"N/A"` placeholders.
    ///
    /// Output:
    /// - Helpers return expected values and `None`/empty defaults for incompatible types.
    fn util_json_extractors() {
        let v: serde_json::Value = serde_json::json!({
            "Title": "Inception",
            "imdbRating": "8.8",
            "Metascore": 74,
            "BoxOffice": "N/A",
        });
        assert_eq!(s(&v, "Title"), "Inception");
        assert_eq!(s(&v, "missing"), "");
        assert_eq!(ss(&v, &["Name", "Title"]).as_deref(), Some("Inception"));
        assert_eq!(ss(&v, &["Name", "Alias"]), None);
        assert_eq!(f64_of(&v, "imdbRating"), Some(8.8));
        assert_eq!(f64_of(&v, "Metascore"), Some(74.0));
        assert_eq!(f64_of(&v, "BoxOffice"), None);
        assert_eq!(f64_of(&v, "missing"), None);
    }

    #[test]
    /// What: Parse catalog runtime strings into whole minutes.
    ///
    /// Inputs:
    /// - Typical `"148 min"` values plus `"N/A"` and empty edge cases.
    ///
    /// Output:
    /// - Leading integer extracted; unparsable inputs yield `None`.
    fn util_runtime_minutes() {
        assert_eq!(runtime_minutes("148 min"), Some(148));
        assert_eq!(runtime_minutes("  90 min "), Some(90));
        assert_eq!(runtime_minutes("N/A"), None);
        assert_eq!(runtime_minutes(""), None);
    }

    #[test]
    /// What: Ensure curl argument construction keeps the URL last after extras.
    ///
    /// Inputs:
    /// - A URL plus a `--max-time` extra argument pair.
    ///
    /// Output:
    /// - Base flags first, extras in order, URL as the final element.
    fn util_curl_args_shape() {
        let args = curl_args("https://example.test/api", &["--max-time", "10"]);
        assert_eq!(args.first().map(String::as_str), Some("-sSLf"));
        assert_eq!(
            args.last().map(String::as_str),
            Some("https://example.test/api")
        );
        assert!(args.windows(2).any(|w| w[0] == "--max-time" && w[1] == "10"));
    }
}
