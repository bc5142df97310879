//! Config - Application Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CACHE_KEY, DEFAULT_MAX_RETRIES, DEFAULT_OVERSCAN, DEFAULT_PAGE_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_DELAY_MS, DEFAULT_ROW_HEIGHT,
    DEFAULT_VIEWPORT_HEIGHT,
};

/// Main application configuration (`config.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Loader and list behavior
    pub list: ListConfig,
    /// Where records come from
    pub source: SourceConfig,
}

/// Loader, cache and renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListConfig {
    /// Records requested per page
    pub page_size: u32,
    /// Retry budget per failure streak
    pub max_retries: u32,
    /// Backoff base in milliseconds
    pub retry_delay_ms: u64,
    /// Write-through cache of the last successful result
    pub enable_cache: bool,
    /// Key of the cache entry
    pub cache_key: String,
    /// Fetch timeout in seconds (0 disables it)
    pub request_timeout_secs: u64,
    /// Fixed row height in pixels
    pub row_height: f32,
    /// Visible list height in pixels
    pub viewport_height: f32,
    /// Extra rows rendered above and below the viewport
    pub overscan: usize,
    /// Send search, filters and sort to the source as query parameters
    /// instead of narrowing only the held records
    pub server_query: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            enable_cache: true,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            row_height: DEFAULT_ROW_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            server_query: false,
        }
    }
}

impl ListConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Page size clamped to the `limit > 0` invariant
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.max(1)
    }
}

/// Record source kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// In-memory generated roster
    #[default]
    Demo,
    /// HTTP/JSON endpoint
    Http,
}

/// Record source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Which source to use
    pub kind: SourceKind,
    /// Endpoint URL for the HTTP source
    pub endpoint: Option<String>,
    /// Size of the generated demo roster
    pub demo_size: usize,
    /// Simulated latency for the demo source
    pub latency_ms: u64,
    /// Probability (0.0 - 1.0) that a demo fetch fails
    pub failure_rate: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Demo,
            endpoint: None,
            demo_size: 2500,
            latency_ms: 400,
            failure_rate: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = r#"
            [list]
            max_retries = 5
            enable_cache = false

            [source]
            kind = "http"
            endpoint = "http://localhost:8080/players"
        "#;
        let config: AppConfig = toml::from_str(text).expect("config");
        assert_eq!(config.list.max_retries, 5);
        assert!(!config.list.enable_cache);
        assert_eq!(config.list.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.list.retry_delay(), Duration::from_millis(1000));
        assert_eq!(config.source.kind, SourceKind::Http);
        assert_eq!(config.source.demo_size, 2500);
        assert!(!config.list.server_query);
    }

    #[test]
    fn test_timeout_zero_disables() {
        let config = ListConfig {
            request_timeout_secs: 0,
            page_size: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.effective_page_size(), 1);
    }
}
