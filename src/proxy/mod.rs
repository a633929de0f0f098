//! Credential-injecting proxy
//!
//! Turns one inbound request into at most one upstream GET against the news
//! or stock API, adding the server-held token, and relays the result.

mod error;
mod route;
mod upstream;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use std::sync::Arc;

use crate::config::{Config, Credentials, UpstreamConfig};
use crate::http;
use crate::logger::{ErrorLog, ErrorSink};

pub use error::ProxyError;
pub use route::{ApiRoute, UpstreamRequest};
pub use upstream::{HttpUpstream, Upstream, UpstreamResponse};

/// Per-process proxy handler; shared read-only across invocations
pub struct ProxyHandler {
    upstream_config: UpstreamConfig,
    credentials: Credentials,
    upstream: Arc<dyn Upstream>,
    errors: Arc<dyn ErrorSink>,
}

impl ProxyHandler {
    pub fn new(config: &Config, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            upstream_config: config.upstream.clone(),
            credentials: config.credentials.clone(),
            upstream,
            errors: Arc::new(ErrorLog),
        }
    }

    #[must_use]
    pub fn with_error_sink(mut self, errors: Arc<dyn ErrorSink>) -> Self {
        self.errors = errors;
        self
    }

    /// Handle one inbound request. Never fails: every outcome is a response.
    pub async fn handle(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
    ) -> Response<Full<Bytes>> {
        if *method == Method::OPTIONS {
            return http::build_preflight_response();
        }

        match self.forward(path, query).await {
            Ok(payload) => http::build_json_response(StatusCode::OK, &payload),
            Err(err) => {
                if let Some(cause) = err.diagnostic() {
                    self.errors.report(&format!("Proxy Error: {cause}"));
                }
                err.into_response()
            }
        }
    }

    async fn forward(
        &self,
        path: &str,
        query: Option<&str>,
    ) -> Result<serde_json::Value, ProxyError> {
        let route = ApiRoute::resolve(path, query)?;
        let token = route.token(&self.credentials, &self.upstream_config)?;
        let request = route.build_request(&self.upstream_config, token)?;

        let reply = self.upstream.fetch(&request).await?;
        if !reply.status.is_success() {
            return Err(ProxyError::Upstream {
                status: reply.status,
                body: String::from_utf8_lossy(&reply.body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&reply.body)?)
    }
}
