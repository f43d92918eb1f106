//! Constructor-injected settings for the search client.
//!
//! `SearchConfig::default()` points at the public Google Books endpoint.
//! Tests and hosts swap `endpoint` for a mock server. Hosts crossing the C
//! ABI pass the config as JSON, so timeouts are plain milliseconds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes?q=";
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL the encoded query is appended to, up to and including `q=`.
    pub endpoint: String,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

impl SearchConfig {
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ..Self::default()
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_endpoint() {
        let config = SearchConfig::default();
        assert_eq!(config.endpoint, "https://www.googleapis.com/books/v1/volumes?q=");
        assert_eq!(config.connect_timeout(), Duration::from_secs(15));
        assert_eq!(config.read_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"endpoint":"http://127.0.0.1:3000/books/v1/volumes?q="}"#).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:3000/books/v1/volumes?q=");
        assert_eq!(config.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS);
    }
}
