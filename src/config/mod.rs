use serde::{Deserialize, Serialize};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration injected by the hosting page through `window.ENV`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    /// Backend origin. Empty means same-origin (relative `/api/...` paths).
    pub api_url: String,
    /// `tracing` filter directive, e.g. `info` or `earn_app=debug`.
    pub log_level: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let api_url = read_env_string(&["API_URL", "api_url"]).unwrap_or_default();
        let log_level = read_env_string(&["LOG_LEVEL", "log_level"])
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            api_url: normalize_base_url(&api_url),
            log_level,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// First string value found under `keys` (in order) on `window.ENV`.
fn read_env_string(keys: &[&str]) -> Option<String> {
    let window = web_sys::window()?;
    let env = window.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }

    keys.iter().find_map(|k| {
        js_sys::Reflect::get(&env, &(*k).into())
            .ok()
            .and_then(|v| v.as_string())
            .filter(|s| !s.trim().is_empty())
    })
}

/// Paths are joined as `{base}{path}` with `path` starting at `/`.
pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slashes() {
        assert_eq!(normalize_base_url("https://earn.example.com/"), "https://earn.example.com");
        assert_eq!(normalize_base_url(" https://earn.example.com// "), "https://earn.example.com");
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn default_is_same_origin_info() {
        let c = EnvConfig::default();
        assert_eq!(c.api_url, "");
        assert_eq!(c.log_level, "info");
    }
}
