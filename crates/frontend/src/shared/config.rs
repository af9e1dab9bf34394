//! Runtime configuration of the console.
//!
//! The API base comes from `<meta name="wms-api-base" content="...">` when the
//! hosting page provides one; otherwise the backend is assumed on port 3000 of
//! the serving host, under `/api`.

use once_cell::sync::Lazy;

const API_BASE_META: &str = "meta[name=\"wms-api-base\"]";
const BACKEND_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base: String,
    /// How long a transient notice stays on screen.
    pub notice_ttl_ms: u32,
    /// Row cap of the unpaginated export query.
    pub export_limit: u32,
    pub upload_poll_interval_ms: u32,
}

// Native test builds have no window to read from.
static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    if cfg!(target_arch = "wasm32") {
        AppConfig::from_window()
    } else {
        AppConfig::default()
    }
});

impl AppConfig {
    fn from_window() -> Self {
        let meta = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(API_BASE_META).ok().flatten())
            .and_then(|el| el.get_attribute("content"));
        let (protocol, hostname) = match web_sys::window() {
            Some(w) => {
                let location = w.location();
                (
                    location.protocol().unwrap_or_else(|_| "http:".to_string()),
                    location
                        .hostname()
                        .unwrap_or_else(|_| "127.0.0.1".to_string()),
                )
            }
            None => ("http:".to_string(), "127.0.0.1".to_string()),
        };
        let api_base = resolve_api_base(meta.as_deref(), &protocol, &hostname);
        log::debug!("API base resolved to {}", api_base);
        Self {
            api_base,
            ..Self::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: resolve_api_base(None, "http:", "127.0.0.1"),
            notice_ttl_ms: 4000,
            export_limit: 10_000,
            upload_poll_interval_ms: 2000,
        }
    }
}

pub fn config() -> &'static AppConfig {
    &CONFIG
}

/// Full URL for an API path such as `/inbound/brands`.
pub fn api_url(path: &str) -> String {
    format!("{}{}", config().api_base, path)
}

pub fn resolve_api_base(meta: Option<&str>, protocol: &str, hostname: &str) -> String {
    match meta.map(str::trim).filter(|m| !m.is_empty()) {
        Some(explicit) => explicit.trim_end_matches('/').to_string(),
        None => format!("{}//{}:{}/api", protocol, hostname, BACKEND_PORT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_from_location() {
        assert_eq!(
            resolve_api_base(None, "https:", "wms.example.com"),
            "https://wms.example.com:3000/api"
        );
    }

    #[test]
    fn test_meta_override_wins() {
        assert_eq!(
            resolve_api_base(Some("https://api.example.com/v1/"), "http:", "localhost"),
            "https://api.example.com/v1"
        );
        assert_eq!(
            resolve_api_base(Some("  "), "http:", "localhost"),
            "http://localhost:3000/api"
        );
    }
}
