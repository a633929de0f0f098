//! Outbound HTTP client
//!
//! One GET per invocation. No timeout and no retry: a hung upstream keeps the
//! invocation open until it answers or the connection drops.

use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::StatusCode;
use reqwest::Client;

use super::error::ProxyError;
use super::route::UpstreamRequest;

/// Status and raw body of an upstream reply
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Executes an [`UpstreamRequest`]
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, ProxyError>;
}

/// Production upstream backed by a shared `reqwest` client
pub struct HttpUpstream {
    client: Client,
}

impl HttpUpstream {
    /// Accepts a pre-built client so TLS setup happens once, outside request handling
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn build_client(user_agent: &str) -> Result<Client, reqwest::Error> {
        Client::builder().user_agent(user_agent).build()
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, ProxyError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().await?;
        // reqwest and hyper share the `http` crate, so the status carries over as-is
        let status = response.status();
        let body = response.bytes().await?;
        Ok(UpstreamResponse { status, body })
    }
}
