//! Logger module
//!
//! Provides logging utilities for the proxy server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Destination for diagnostics raised while serving a request
pub trait ErrorSink: Send + Sync {
    fn report(&self, message: &str);
}

/// Default sink: the process error log
pub struct ErrorLog;

impl ErrorSink for ErrorLog {
    fn report(&self, message: &str) {
        log_error(message);
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Proxy server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(max) = config.performance.max_connections {
        write_info(&format!("Max connections: {max}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info(&format!("News upstream: {}", config.upstream.news_base_url));
    write_info(&format!("Stock upstream: {}", config.upstream.stock_base_url));
    log_credential_status("NEWS_API_KEY", config.credentials.news().is_some());
    log_credential_status("EODHD_API_KEY", config.credentials.eodhd().is_some());
    write_info("======================================\n");
}

/// Report whether a token is configured, never its value
fn log_credential_status(name: &str, configured: bool) {
    if configured {
        write_info(&format!("{name}: configured"));
    } else {
        log_warning(&format!(
            "{name} is not set; requests to its route will fail with 500"
        ));
    }
}

pub fn log_server_stop(active: usize) {
    write_info(&server_stop_message(active));
}

fn server_stop_message(active: usize) -> String {
    format!("[Shutdown] Listener closed, aborting {active} in-flight connection(s)")
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
