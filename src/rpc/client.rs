//! Minimal JSON-RPC 2.0 client for an EVM-compatible node.
//!
//! Each operation is one self-contained POST; the client keeps no per-call
//! state, so a single instance can be shared between concurrent pollers.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::rpc::error::ClientError;
use crate::rpc::hex::parse_hex_u64;
use crate::rpc::transport::{HttpTransport, ReqwestTransport};
use crate::rpc::types::{decode_sync_status, JsonRpcRequest, JsonRpcResponse, SyncStatus};

/// Bytes of a non-2xx body kept in the transport error message.
const MAX_ERROR_BODY: usize = 256;

#[derive(Clone)]
pub struct RpcClient {
    endpoint: String,
    transport: Arc<dyn HttpTransport>,
}

impl RpcClient {
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { endpoint: endpoint.into(), transport }
    }

    /// Client over a reqwest transport with the given request timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::new(endpoint, Arc::new(transport)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute one request and return its raw result (`Value::Null` when absent).
    pub async fn call(&self, request: &JsonRpcRequest) -> Result<Value, ClientError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| ClientError::Protocol(format!("marshal request: {}", e)))?;

        debug!(method = request.method(), endpoint = %self.endpoint, "sending JSON-RPC request");
        let resp = self.transport.post_json(&self.endpoint, body).await?;

        if !(200..300).contains(&resp.status) {
            return Err(ClientError::Transport(format!(
                "RPC returned HTTP {}: {}",
                resp.status,
                body_excerpt(&resp.body)
            )));
        }

        let envelope = parse_envelope(&resp.body)?;
        if let Some(err) = envelope.error {
            return Err(ClientError::Rpc { code: err.code, message: err.message });
        }
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    /// Current block height (`eth_blockNumber`).
    pub async fn get_block_number(&self) -> Result<u64, ClientError> {
        let request = JsonRpcRequest::block_number();
        let result = self.call(&request).await?;
        decode_quantity(request.method(), result)
    }

    /// Chain id (`eth_chainId`).
    pub async fn get_chain_id(&self) -> Result<u64, ClientError> {
        let request = JsonRpcRequest::chain_id();
        let result = self.call(&request).await?;
        decode_quantity(request.method(), result)
    }

    /// Sync status (`eth_syncing`).
    pub async fn get_sync_status(&self) -> Result<SyncStatus, ClientError> {
        let result = self.call(&JsonRpcRequest::syncing()).await?;
        decode_sync_status(&result)
    }
}

fn parse_envelope(body: &[u8]) -> Result<JsonRpcResponse, ClientError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ClientError::Protocol(format!("unmarshal response: {}", e)))?;
    if !value.is_object() {
        return Err(ClientError::Protocol(format!(
            "unmarshal response: expected JSON-RPC object, got {}",
            body_excerpt(body)
        )));
    }
    serde_json::from_value(value).map_err(|e| ClientError::Protocol(format!("unmarshal response: {}", e)))
}

fn decode_quantity(method: &str, result: Value) -> Result<u64, ClientError> {
    match result {
        Value::String(s) => parse_hex_u64(&s).map_err(|e| ClientError::Decode(format!("{}: {}", method, e))),
        other => Err(ClientError::Decode(format!("{}: expected hex string, got {}", method, other))),
    }
}

fn body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.len() <= MAX_ERROR_BODY {
        return text.to_string();
    }
    let mut cut = MAX_ERROR_BODY;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &text[..cut])
}
