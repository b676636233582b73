//! Client configuration from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_WS_HOST: &str = "localhost:3000";

/// Where the client talks to and where it keeps its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL for HTTP requests.
    pub api_url: String,
    /// `host[:port]` of the WebSocket endpoint.
    pub ws_host: String,
    /// Directory for the file store. `None` uses the platform config dir.
    pub storage_dir: Option<PathBuf>,
    /// Username to use when no session is stored.
    pub username: Option<String>,
    /// Email to use when no session is stored.
    pub email: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            ws_host: DEFAULT_WS_HOST.to_string(),
            storage_dir: None,
            username: None,
            email: None,
        }
    }
}

impl ClientConfig {
    /// Parse configuration from environment variables.
    ///
    /// Environment variables:
    /// - `WEBCOM_API_URL`: HTTP base URL (default: "http://localhost:3000")
    /// - `WEBCOM_WS_HOST`: WebSocket host (default: "localhost:3000")
    /// - `WEBCOM_STORAGE_DIR`: file store directory (default: platform config dir)
    /// - `WEBCOM_USERNAME` / `WEBCOM_EMAIL`: identity when no session is stored
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration using `lookup` in place of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_empty("WEBCOM_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            ws_host: non_empty("WEBCOM_WS_HOST").unwrap_or_else(|| DEFAULT_WS_HOST.to_string()),
            storage_dir: non_empty("WEBCOM_STORAGE_DIR").map(PathBuf::from),
            username: non_empty("WEBCOM_USERNAME"),
            email: non_empty("WEBCOM_EMAIL"),
        }
    }
}
