//! Route resolution
//!
//! The proxy knows exactly two routes. Each variant carries what it extracted
//! from the inbound request and knows how to build its upstream request.

use url::Url;

use super::error::ProxyError;
use crate::config::{Credentials, UpstreamConfig};

const API_PREFIX: &str = "/api/";
const NEWS_PREFIX: &str = "/api/everything";
const STOCK_PREFIX: &str = "/api/eodhd";

/// Fixed query appended after the stock token; not caller-configurable
const STOCK_FIXED_PARAMS: [(&str, &str); 3] = [("fmt", "json"), ("period", "d"), ("limit", "30")];

/// A resolved inbound route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute<'a> {
    /// News "everything" search, forwarded path and query verbatim
    News {
        /// Inbound path with the `/api/` prefix removed
        upstream_path: &'a str,
        /// Raw inbound query string, without the leading `?`
        query: Option<&'a str>,
    },
    /// Stock end-of-day prices
    Stock {
        /// Raw inbound query string, `symbol` is read from it
        query: Option<&'a str>,
    },
}

/// Outbound request description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

impl<'a> ApiRoute<'a> {
    /// Resolve a route by path prefix. The query string is never consulted.
    pub fn resolve(path: &'a str, query: Option<&'a str>) -> Result<Self, ProxyError> {
        if path.starts_with(NEWS_PREFIX) {
            Ok(Self::News {
                upstream_path: &path[API_PREFIX.len()..],
                query,
            })
        } else if path.starts_with(STOCK_PREFIX) {
            Ok(Self::Stock { query })
        } else {
            Err(ProxyError::RouteNotFound)
        }
    }

    /// Upstream endpoint this route targets, as named in configuration errors.
    /// The news route names its endpoint (`.../v2/everything`), not the API root.
    pub fn target(&self, upstream: &UpstreamConfig) -> String {
        match self {
            Self::News { upstream_path, .. } => {
                let endpoint = upstream_path.split('/').next().unwrap_or_default();
                format!("{}/{endpoint}", upstream.news_base_url.trim_end_matches('/'))
            }
            Self::Stock { .. } => upstream.stock_base_url.clone(),
        }
    }

    /// Token for this route, or `ConfigurationMissing` naming the upstream
    pub fn token<'c>(
        &self,
        credentials: &'c Credentials,
        upstream: &UpstreamConfig,
    ) -> Result<&'c str, ProxyError> {
        let token = match self {
            Self::News { .. } => credentials.news(),
            Self::Stock { .. } => credentials.eodhd(),
        };
        token.ok_or_else(|| ProxyError::ConfigurationMissing {
            target: self.target(upstream),
        })
    }

    /// Build the authenticated upstream request
    pub fn build_request(
        &self,
        upstream: &UpstreamConfig,
        token: &str,
    ) -> Result<UpstreamRequest, ProxyError> {
        match self {
            Self::News {
                upstream_path,
                query,
            } => Ok(UpstreamRequest {
                url: news_url(&upstream.news_base_url, upstream_path, *query),
                headers: vec![("X-Api-Key", token.to_string())],
            }),
            Self::Stock { query } => {
                let symbol = query_param(*query, "symbol").ok_or(ProxyError::MissingParameter)?;
                Ok(UpstreamRequest {
                    url: stock_url(&upstream.stock_base_url, &symbol, token)?,
                    headers: Vec::new(),
                })
            }
        }
    }
}

fn news_url(base: &str, upstream_path: &str, query: Option<&str>) -> String {
    let mut url = String::with_capacity(base.len() + upstream_path.len() + 1);
    url.push_str(base.trim_end_matches('/'));
    url.push('/');
    url.push_str(upstream_path);
    if let Some(q) = query {
        url.push('?');
        url.push_str(q);
    }
    url
}

fn stock_url(base: &str, symbol: &str, token: &str) -> Result<String, ProxyError> {
    let mut url = Url::parse(base).map_err(|e| ProxyError::TransportOrParse {
        cause: format!("invalid stock base URL '{base}': {e}"),
    })?;
    url.path_segments_mut()
        .map_err(|()| ProxyError::TransportOrParse {
            cause: format!("stock base URL '{base}' cannot take a path"),
        })?
        .pop_if_empty()
        .push(symbol);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear().append_pair("api_token", token);
        for (key, value) in STOCK_FIXED_PARAMS {
            pairs.append_pair(key, value);
        }
    }
    Ok(url.into())
}

/// First non-empty value of `name` in a form-encoded query string
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
