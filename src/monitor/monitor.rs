//! Monitor orchestration: build the RPC client, aggregator and HTTP server.
//!
//! The client is constructed here and handed down explicitly; there is no
//! process-wide instance.

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::api::{AppState, MonitorServer};
use crate::collector::SnapshotAggregator;
use crate::monitor::config::MonitorConfig;
use crate::monitor::service_handle::ServiceHandle;
use crate::rpc::RpcClient;
use crate::utils::{MetricsRegistry, Result};

pub struct Monitor {
    cfg: MonitorConfig,
}

impl Monitor {
    pub fn new(cfg: MonitorConfig) -> Self {
        Self { cfg }
    }

    /// Bind the server, spawn it, and return the handle plus the bound address.
    pub async fn start(self) -> Result<(ServiceHandle, SocketAddr)> {
        let client = Arc::new(RpcClient::with_timeout(self.cfg.rpc_endpoint.clone(), self.cfg.rpc_timeout)?);
        let aggregator = SnapshotAggregator::new(client);
        let metrics = MetricsRegistry::new(&self.cfg.namespace)?;
        let state = Arc::new(AppState::new(aggregator, metrics));

        let server = MonitorServer::bind(self.cfg.listen_addr, state, self.cfg.handler_timeout)?;
        let addr = server.local_addr()?;

        let (mut svc_handle, shutdown_rx) = ServiceHandle::new(addr);
        svc_handle.attach(tokio::spawn(server.serve(shutdown_rx)));

        info!(
            "monitor started on {}, monitoring RPC endpoint: {} (timeout {:?})",
            addr, self.cfg.rpc_endpoint, self.cfg.rpc_timeout
        );
        Ok((svc_handle, addr))
    }
}
