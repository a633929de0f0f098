// Configuration module entry point
// Loads static configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, Credentials, LoggingConfig, PerformanceConfig, ServerConfig, UpstreamConfig,
};

/// Environment variable holding the news API token
pub const NEWS_API_KEY_VAR: &str = "NEWS_API_KEY";
/// Environment variable holding the stock EOD API token
pub const EODHD_API_KEY_VAR: &str = "EODHD_API_KEY";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::build(
            config_path,
            std::env::var(NEWS_API_KEY_VAR).ok(),
            std::env::var(EODHD_API_KEY_VAR).ok(),
        )
    }

    /// Layer file, `PROXY_*` environment and defaults, then apply the token overrides
    fn build(
        config_path: &str,
        news_api_key: Option<String>,
        eodhd_api_key: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let upstream = types::UpstreamConfig::default();
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("PROXY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive", true)?
            .set_default("upstream.news_base_url", upstream.news_base_url)?
            .set_default("upstream.stock_base_url", upstream.stock_base_url)?
            .set_default("upstream.user_agent", upstream.user_agent)?
            .set_override_option("credentials.news_api_key", news_api_key)?
            .set_override_option("credentials.eodhd_api_key", eodhd_api_key)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
