use std::env;
use std::fs;

use super::paths::resolve_settings_config_path;

/// User-tunable settings loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Catalog API key. Required for any network call; the UI surfaces a hint
    /// when it is missing.
    pub api_key: String,
    /// Catalog endpoint base URL.
    pub endpoint: String,
    /// Width of the results pane, percent of the body row.
    pub layout_left_pct: u16,
    /// Width of the detail/watched pane, percent of the body row.
    pub layout_right_pct: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://www.omdbapi.com".to_string(),
            layout_left_pct: 45,
            layout_right_pct: 55,
        }
    }
}

/// What: Strip a trailing `#` or `//` comment from a settings value.
fn strip_inline_comment(raw: &str) -> &str {
    let mut end = raw.len();
    if let Some(pos) = raw.find('#') {
        end = end.min(pos);
    }
    if let Some(pos) = raw.find("//") {
        end = end.min(pos);
    }
    raw[..end].trim()
}

/// What: Load user settings from `settings.conf` under HOME/XDG.
///
/// Inputs:
/// - None (reads the resolved settings file if present; unknown keys are
///   ignored, malformed values keep their defaults).
///
/// Output:
/// - A `Settings` value; falls back to `Settings::default()` when the file is
///   missing or unreadable.
///
/// Details:
/// - Key names are lowercased with `.`/`-`/space normalized to `_`.
/// - The `CINEFILE_API_KEY` environment variable overrides the file's key.
pub fn settings() -> Settings {
    let mut out = Settings::default();

    if let Some(p) = resolve_settings_config_path()
        && let Ok(content) = fs::read_to_string(&p)
    {
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
                continue;
            }
            if !trimmed.contains('=') {
                continue;
            }
            let mut parts = trimmed.splitn(2, '=');
            let raw_key = parts.next().unwrap_or("");
            let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
            let val_raw = parts.next().unwrap_or("").trim();
            let val = strip_inline_comment(val_raw);
            match key.as_str() {
                "api_key" | "omdb_api_key" | "catalog_api_key" => {
                    out.api_key = val.to_string();
                }
                "endpoint" | "catalog_endpoint" | "api_endpoint" => {
                    out.endpoint = val.to_string();
                }
                "layout_left_pct" => {
                    if let Ok(v) = val.parse::<u16>() {
                        out.layout_left_pct = v;
                    }
                }
                "layout_right_pct" => {
                    if let Ok(v) = val.parse::<u16>() {
                        out.layout_right_pct = v;
                    }
                }
                _ => {}
            }
        }
    }

    // Environment override wins over the file
    if let Ok(key) = env::var("CINEFILE_API_KEY")
        && !key.trim().is_empty()
    {
        out.api_key = key;
    }

    // Normalize
    out.api_key = out.api_key.trim().to_string();
    out.endpoint = out.endpoint.trim().trim_end_matches('/').to_string();
    if out.endpoint.is_empty() {
        out.endpoint = Settings::default().endpoint;
    }
    if out.layout_left_pct == 0 || out.layout_left_pct >= 100 {
        out.layout_left_pct = Settings::default().layout_left_pct;
    }
    out.layout_right_pct = 100 - out.layout_left_pct;

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_temp_home(body: Option<&str>, f: impl FnOnce()) {
        let _guard = crate::config::lock_test_mutex();
        let _home_guard = crate::test_utils::lock_home_mutex();
        let orig_home = std::env::var_os("HOME");
        let orig_key = std::env::var_os("CINEFILE_API_KEY");
        let base = std::env::temp_dir().join(format!(
            "cinefile_test_settings_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let conf_dir = base.join(".config").join("cinefile");
        let _ = std::fs::create_dir_all(&conf_dir);
        if let Some(body) = body {
            std::fs::write(conf_dir.join("settings.conf"), body).unwrap();
        }
        unsafe {
            std::env::set_var("HOME", base.display().to_string());
            std::env::remove_var("CINEFILE_API_KEY");
        }

        f();

        unsafe {
            if let Some(v) = orig_home {
                std::env::set_var("HOME", v);
            } else {
                std::env::remove_var("HOME");
            }
            if let Some(v) = orig_key {
                std::env::set_var("CINEFILE_API_KEY", v);
            } else {
                std::env::remove_var("CINEFILE_API_KEY");
            }
        }
        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    /// What: Parse a settings file with comments, aliases, and layout values.
    ///
    /// Inputs:
    /// - A `settings.conf` using the `omdb_api_key` alias, an inline comment,
    ///   and a custom layout split.
    ///
    /// Output:
    /// - Key, endpoint, and layout parsed; right percent derived from left.
    fn settings_parse_file() {
        with_temp_home(
            Some(
                "# cinefile settings\n\
                 omdb_api_key = abc123  # personal key\n\
                 endpoint = https://catalog.test/\n\
                 layout_left_pct = 40\n",
            ),
            || {
                let s = settings();
                assert_eq!(s.api_key, "abc123");
                assert_eq!(s.endpoint, "https://catalog.test");
                assert_eq!(s.layout_left_pct, 40);
                assert_eq!(s.layout_right_pct, 60);
            },
        );
    }

    #[test]
    /// What: Missing file yields defaults; malformed numbers keep defaults.
    ///
    /// Inputs:
    /// - No settings file, then one with an unparsable layout value.
    ///
    /// Output:
    /// - Default endpoint and layout both times.
    fn settings_defaults_and_malformed_values() {
        with_temp_home(None, || {
            let s = settings();
            assert_eq!(s, {
                let mut d = Settings::default();
                d.layout_right_pct = 100 - d.layout_left_pct;
                d
            });
        });
        with_temp_home(Some("layout_left_pct = wide\n"), || {
            let s = settings();
            assert_eq!(s.layout_left_pct, Settings::default().layout_left_pct);
        });
    }

    #[test]
    /// What: The environment API key overrides the file.
    ///
    /// Inputs:
    /// - A file key plus `CINEFILE_API_KEY` set.
    ///
    /// Output:
    /// - The environment value wins.
    fn settings_env_override() {
        with_temp_home(Some("api_key = from_file\n"), || {
            unsafe { std::env::set_var("CINEFILE_API_KEY", "from_env") };
            let s = settings();
            assert_eq!(s.api_key, "from_env");
            unsafe { std::env::remove_var("CINEFILE_API_KEY") };
        });
    }
}
