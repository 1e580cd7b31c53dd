//! HTTP POST capability the client is built on.
//!
//! `ReqwestTransport` is the production implementation; tests plug in their own
//! `HttpTransport` to script node responses without a socket.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::rpc::error::ClientError;

/// Upper bound for one request/response exchange with the node.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw HTTP reply. Status interpretation is left to the caller.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    /// POST `body` as `application/json` and return the full reply.
    ///
    /// Only failures of the exchange itself (connect, timeout, body read) are errors.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, ClientError>;
}

/// reqwest-backed transport with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, ClientError> {
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Transport(format!("RPC request to {} timed out after {:?}", url, self.timeout))
                } else {
                    ClientError::Transport(format!("RPC request to {}: {}", url, e))
                }
            })?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(format!("read response body: {}", e)))?;

        Ok(HttpResponse { status, body: body.to_vec() })
    }
}
