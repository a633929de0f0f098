// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::fmt;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub credentials: Credentials,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    pub max_connections: Option<u64>,
}

/// Upstream API locations
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// News API root, the path after `/api/` is appended to it
    pub news_base_url: String,
    /// Stock EOD root, the symbol is appended as one path segment
    pub stock_base_url: String,
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            news_base_url: DEFAULT_NEWS_BASE_URL.to_string(),
            stock_base_url: DEFAULT_STOCK_BASE_URL.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

pub const DEFAULT_NEWS_BASE_URL: &str = "https://newsapi.org/v2/";
pub const DEFAULT_STOCK_BASE_URL: &str = "https://eodhistoricaldata.com/api/eod/";

pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Server-held API tokens. Never sent back to callers.
#[derive(Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    #[serde(default)]
    pub news_api_key: Option<String>,
    #[serde(default)]
    pub eodhd_api_key: Option<String>,
}

impl Credentials {
    /// News token, `None` when unset or empty
    pub fn news(&self) -> Option<&str> {
        non_empty(self.news_api_key.as_deref())
    }

    /// Stock token, `None` when unset or empty
    pub fn eodhd(&self) -> Option<&str> {
        non_empty(self.eodhd_api_key.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: Option<&str>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("news_api_key", &mask(self.news()))
            .field("eodhd_api_key", &mask(self.eodhd()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_unset() {
        let creds = Credentials {
            news_api_key: Some(String::new()),
            eodhd_api_key: Some("T".to_string()),
        };
        assert_eq!(creds.news(), None);
        assert_eq!(creds.eodhd(), Some("T"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let creds = Credentials {
            news_api_key: Some("super-secret".to_string()),
            eodhd_api_key: None,
        };
        let printed = format!("{creds:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<set>"));
        assert!(printed.contains("<unset>"));
    }
}
