//! RPC client module
//!
//! - JSON-RPC 2.0 over HTTP POST to a single node endpoint
//! - Typed calls: `eth_blockNumber`, `eth_chainId`, `eth_syncing`
//! - Pluggable `HttpTransport` (reqwest in production, fakes in tests)

pub mod client;
pub mod error;
pub mod hex;
pub mod transport;
pub mod types;

pub use client::RpcClient;
pub use error::{ClientError, ErrorKind};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, DEFAULT_RPC_TIMEOUT};
pub use types::{SyncProgress, SyncStatus};
