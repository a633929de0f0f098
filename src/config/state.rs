// Application state module
// Shared, read-only state handed to every connection

use super::types::Config;
use crate::proxy::ProxyHandler;

/// Application state
pub struct AppState {
    pub config: Config,
    pub proxy: ProxyHandler,
}

impl AppState {
    pub const fn new(config: Config, proxy: ProxyHandler) -> Self {
        Self { config, proxy }
    }

    /// Whether access log lines are written for each request
    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
