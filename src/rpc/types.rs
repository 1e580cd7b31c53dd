//! JSON-RPC 2.0 envelopes and the `eth_syncing` result model.
//!
//! Requests are built per method; every method this crate speaks takes an
//! empty parameter list, so there is no way to pass untyped params.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use crate::rpc::error::ClientError;
use crate::rpc::hex::parse_hex_u64;

pub const JSONRPC_VERSION: &str = "2.0";

/// Every request goes out with id 1; one call is in flight per exchange.
pub const REQUEST_ID: u64 = 1;

/// The node methods the monitor queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    BlockNumber,
    ChainId,
    Syncing,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::BlockNumber => "eth_blockNumber",
            Method::ChainId => "eth_chainId",
            Method::Syncing => "eth_syncing",
        }
    }
}

/// Serializes as `[]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoParams;

impl Serialize for NoParams {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_seq(Some(0))?.end()
    }
}

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    jsonrpc: &'static str,
    method: &'static str,
    params: NoParams,
    id: u64,
}

impl JsonRpcRequest {
    fn empty(method: Method) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.as_str(),
            params: NoParams,
            id: REQUEST_ID,
        }
    }

    pub fn block_number() -> Self {
        Self::empty(Method::BlockNumber)
    }

    pub fn chain_id() -> Self {
        Self::empty(Method::ChainId)
    }

    pub fn syncing() -> Self {
        Self::empty(Method::Syncing)
    }

    pub fn method(&self) -> &'static str {
        self.method
    }
}

/// JSON-RPC 2.0 response. Fields are lenient; only the `error` shape is enforced.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Sync progress reported by `eth_syncing` while the node catches up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncProgress {
    pub starting_block: u64,
    pub current_block: u64,
    pub highest_block: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    NotSyncing,
    Syncing(SyncProgress),
}

impl SyncStatus {
    pub fn is_syncing(&self) -> bool {
        matches!(self, SyncStatus::Syncing(_))
    }

    pub fn progress(&self) -> Option<SyncProgress> {
        match self {
            SyncStatus::NotSyncing => None,
            SyncStatus::Syncing(p) => Some(*p),
        }
    }
}

/// Decode an `eth_syncing` result.
///
/// A boolean is tried first and any boolean, `true` included, means the node
/// is not syncing. Only then is the value read as a progress object. Each
/// field is decoded on its own: a missing one stays zero, and one that is null
/// or not a valid hex u64 is logged and read as zero. Unknown keys are ignored.
pub fn decode_sync_status(result: &Value) -> Result<SyncStatus, ClientError> {
    if bool::deserialize(result).is_ok() {
        return Ok(SyncStatus::NotSyncing);
    }
    match result {
        Value::Object(progress) => Ok(SyncStatus::Syncing(SyncProgress {
            starting_block: progress_field(progress, "startingBlock"),
            current_block: progress_field(progress, "currentBlock"),
            highest_block: progress_field(progress, "highestBlock"),
        })),
        other => Err(ClientError::Decode(format!(
            "eth_syncing: expected boolean or object, got {}",
            other
        ))),
    }
}

fn progress_field(progress: &Map<String, Value>, key: &str) -> u64 {
    let decoded = match progress.get(key) {
        None => return 0,
        Some(Value::String(s)) => parse_hex_u64(s).map_err(|e| e.to_string()),
        Some(other) => Err(format!("expected hex string, got {}", other)),
    };
    decoded.unwrap_or_else(|e| {
        warn!(field = key, error = %e, "unusable eth_syncing progress field, reading it as 0");
        0
    })
}
