use thiserror::Error;

use crate::rpc::ClientError;

/// Unified error type for the monitor process
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("RPC client error: {0}")]
    Client(#[from] ClientError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, MonitorError>;
