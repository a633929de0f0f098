//! Proxy error taxonomy
//!
//! Every failure an invocation can end in, mapped to exactly one status code
//! and one `{"error": ...}` body by [`ProxyError::into_response`].

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use thiserror::Error;

use crate::http;

pub const ROUTE_NOT_FOUND_MESSAGE: &str = "API route not found. Use /api/everything or /api/eodhd";
pub const MISSING_SYMBOL_MESSAGE: &str = "Missing stock symbol for EODHD request.";
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "External API Error";
pub const FETCH_FAILURE_MESSAGE: &str = "Internal Server Error during fetch.";

/// Errors that end a proxy invocation.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Path matches neither known route
    #[error("{}", ROUTE_NOT_FOUND_MESSAGE)]
    RouteNotFound,

    /// Required `symbol` query parameter absent for the stock route
    #[error("{}", MISSING_SYMBOL_MESSAGE)]
    MissingParameter,

    /// Token for the matched route is not configured
    #[error("{target} API key not configured on the proxy server.")]
    ConfigurationMissing {
        /// Upstream base URL the token belongs to
        target: String,
    },

    /// Upstream answered with a non-2xx status
    #[error("{}", upstream_message(.body))]
    Upstream {
        status: StatusCode,
        /// Raw upstream body text, possibly empty
        body: String,
    },

    /// Network failure, unreadable body, or a success body that is not JSON
    #[error("{}", FETCH_FAILURE_MESSAGE)]
    TransportOrParse {
        /// Underlying cause, logged but never sent to the caller
        cause: String,
    },
}

impl ProxyError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MissingParameter => StatusCode::BAD_REQUEST,
            Self::ConfigurationMissing { .. } | Self::TransportOrParse { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Upstream { status, .. } => *status,
        }
    }

    /// Cause to report on the error log; only transport/parse failures have one
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::TransportOrParse { cause } => Some(cause),
            _ => None,
        }
    }

    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        http::build_json_response(self.status(), &self.body())
    }
}

fn upstream_message(body: &str) -> &str {
    if body.is_empty() {
        UPSTREAM_FALLBACK_MESSAGE
    } else {
        body
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        // The stock URL carries the token in its query string
        let err = err.without_url();
        let mut cause = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            cause.push_str(": ");
            cause.push_str(&inner.to_string());
            source = inner.source();
        }
        Self::TransportOrParse { cause }
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        Self::TransportOrParse {
            cause: format!("invalid JSON from upstream: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProxyError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ProxyError::MissingParameter.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProxyError::ConfigurationMissing {
                target: "https://example.test/".to_string()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ProxyError::Upstream {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "rate limited".to_string()
            }
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ProxyError::TransportOrParse {
                cause: "connection reset".to_string()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bodies() {
        assert_eq!(
            ProxyError::RouteNotFound.body(),
            serde_json::json!({"error": "API route not found. Use /api/everything or /api/eodhd"})
        );
        assert_eq!(
            ProxyError::MissingParameter.body(),
            serde_json::json!({"error": "Missing stock symbol for EODHD request."})
        );
        assert_eq!(
            ProxyError::ConfigurationMissing {
                target: "https://eodhistoricaldata.com/api/eod/".to_string()
            }
            .body(),
            serde_json::json!({
                "error": "https://eodhistoricaldata.com/api/eod/ API key not configured on the proxy server."
            })
        );
    }

    #[test]
    fn test_upstream_body_fallback() {
        let empty = ProxyError::Upstream {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        assert_eq!(empty.body(), serde_json::json!({"error": "External API Error"}));

        let relayed = ProxyError::Upstream {
            status: StatusCode::UNAUTHORIZED,
            body: r#"{"status":"error"}"#.to_string(),
        };
        assert_eq!(relayed.body(), serde_json::json!({"error": r#"{"status":"error"}"#}));
    }

    #[test]
    fn test_transport_cause_stays_private() {
        let err = ProxyError::TransportOrParse {
            cause: "dns error: api_token=T".to_string(),
        };
        assert_eq!(err.diagnostic(), Some("dns error: api_token=T"));
        assert_eq!(
            err.body(),
            serde_json::json!({"error": "Internal Server Error during fetch."})
        );
        assert_eq!(ProxyError::RouteNotFound.diagnostic(), None);
        assert_eq!(ProxyError::MissingParameter.diagnostic(), None);
    }
}
