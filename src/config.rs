//! Client configuration
//!
//! [`ClientConfig`] is the serde-friendly form of the builder knobs, for host
//! applications that load settings from TOML/JSON/env.
//!
//! ```rust
//! use wecom_sdk::config::ClientConfig;
//!
//! let config: ClientConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
//! assert_eq!(config.base_url, "https://qyapi.weixin.qq.com");
//! assert_eq!(config.timeout_secs, 5);
//! assert_eq!(config.connect_timeout_secs, None);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_BASE_URL: &str = "https://qyapi.weixin.qq.com";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and host of the WeCom API
    pub base_url: String,
    /// Whole-request deadline
    pub timeout_secs: u64,
    /// Connection establishment deadline, unset by default
    pub connect_timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.connect_timeout().is_none());
    }

    #[test]
    fn test_deserialize_full() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"base_url": "http://127.0.0.1:8080", "timeout_secs": 10, "connect_timeout_secs": 2}"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
