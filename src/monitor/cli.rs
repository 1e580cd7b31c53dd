use anyhow::Result;
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::info;

use crate::monitor::{Monitor, MonitorConfig};
use crate::utils::init_logging;

/// Prometheus exporter and health dashboard for an EVM-compatible RPC node.
#[derive(Parser, Debug)]
#[clap(name = "goat-monitor", version)]
pub struct Cli {
    /// JSON-RPC endpoint of the node to monitor
    #[clap(long, env = "GOAT_RPC_NODE")]
    pub rpc_endpoint: Option<String>,

    /// port for the /metrics and /health server [default: 9090]
    #[clap(long, env = "PORT")]
    pub port: Option<u16>,

    /// listen address [default: 0.0.0.0]
    #[clap(long)]
    pub host: Option<IpAddr>,

    /// timeout for each RPC call, in seconds [default: 10]
    #[clap(long)]
    pub rpc_timeout_secs: Option<u64>,

    /// timeout for serving one HTTP request, in seconds [default: 35]
    #[clap(long)]
    pub handler_timeout_secs: Option<u64>,

    /// metric name prefix [default: goat]
    #[clap(long)]
    pub namespace: Option<String>,

    /// optional TOML config file; CLI flags and env vars take precedence
    #[clap(long, env = "GOAT_MONITOR_CONFIG")]
    pub config: Option<PathBuf>,
}

pub async fn run_cli() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = MonitorConfig::from_cli(&cli)?;

    let (svc, addr) = Monitor::new(config).start().await?;
    info!("goat-monitor listening on {}", addr);

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    info!("shutting down goat-monitor");
    svc.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "goat-monitor",
            "--rpc-endpoint",
            "http://10.0.0.5:8545",
            "--port",
            "9191",
            "--host",
            "127.0.0.1",
            "--rpc-timeout-secs",
            "4",
            "--namespace",
            "goat_mainnet",
        ])
        .unwrap();
        assert_eq!(cli.rpc_endpoint.as_deref(), Some("http://10.0.0.5:8545"));
        assert_eq!(cli.port, Some(9191));
        assert_eq!(cli.host, Some("127.0.0.1".parse().unwrap()));
        assert_eq!(cli.rpc_timeout_secs, Some(4));
        assert_eq!(cli.namespace.as_deref(), Some("goat_mainnet"));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["goat-monitor", "--port", "70000"]).is_err());
    }
}
