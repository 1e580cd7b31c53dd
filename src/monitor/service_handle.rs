use std::net::SocketAddr;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::utils::{MonitorError, Result};

/// A running monitor: the address it serves on, its tasks and the channel
/// that stops them.
pub struct ServiceHandle {
    addr: SocketAddr,
    shutdown_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<Result<()>>>,
}

impl ServiceHandle {
    /// Create a handle for a monitor bound to `addr`, plus the receiver its
    /// tasks watch for shutdown.
    pub fn new(addr: SocketAddr) -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { addr, shutdown_tx: tx, tasks: vec![] }, rx)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn attach(&mut self, h: JoinHandle<Result<()>>) {
        self.tasks.push(h);
    }

    /// Signal shutdown and wait for every task. The first task failure is
    /// returned once all of them have finished.
    pub async fn shutdown(self) -> Result<()> {
        info!("stopping monitor on {}", self.addr);
        let _ = self.shutdown_tx.send(true);

        let mut first_err = None;
        for h in self.tasks {
            let outcome = match h.await {
                Ok(res) => res,
                Err(e) => Err(MonitorError::Server(format!("task join error: {}", e))),
            };
            if let Err(e) = outcome {
                error!("monitor task on {} failed: {}", self.addr, e);
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => {
                info!("monitor on {} stopped", self.addr);
                Ok(())
            }
        }
    }
}
