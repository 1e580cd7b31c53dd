//! goat-monitor: polls an EVM-compatible JSON-RPC node for block height,
//! chain id and sync status, and serves the result as Prometheus metrics and
//! a JSON health document.

pub mod api;
pub mod collector;
pub mod monitor;
pub mod rpc;
pub mod utils;
