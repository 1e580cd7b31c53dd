use serde::Serialize;
use thiserror::Error;

/// Coarse classification of a failed call, used for tagging and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Protocol,
    Rpc,
    Decode,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Rpc => "rpc",
            ErrorKind::Decode => "decode",
        }
    }
}

/// Error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Connection refused, timeout, unreadable body or a non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),
    /// 2xx response whose body is not a JSON-RPC envelope.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// Well-formed envelope carrying an `error` object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    /// Valid envelope, but the result does not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Protocol(_) => ErrorKind::Protocol,
            ClientError::Rpc { .. } => ErrorKind::Rpc,
            ClientError::Decode(_) => ErrorKind::Decode,
        }
    }
}
