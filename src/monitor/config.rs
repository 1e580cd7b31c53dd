//! Monitor configuration: CLI/env values layered over an optional TOML file.

use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use crate::api::exposition::DEFAULT_NAMESPACE;
use crate::api::DEFAULT_HANDLER_TIMEOUT;
use crate::monitor::cli::Cli;
use crate::rpc::DEFAULT_RPC_TIMEOUT;
use crate::utils::{MonitorError, Result};

pub const DEFAULT_PORT: u16 = 9090;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// On-disk configuration. Every key is optional.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub rpc_endpoint: Option<String>,
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub rpc_timeout_secs: Option<u64>,
    pub handler_timeout_secs: Option<u64>,
    pub namespace: Option<String>,
}

impl FileConfig {
    /// Load config from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| MonitorError::Config(format!("read {}: {}", path.display(), e)))?;
        Self::parse(&data).map_err(|e| MonitorError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(data: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(data)
    }
}

/// Fully resolved settings the monitor runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub rpc_endpoint: String,
    pub listen_addr: SocketAddr,
    pub rpc_timeout: Duration,
    pub handler_timeout: Duration,
    pub namespace: String,
}

impl MonitorConfig {
    /// Read the file named by `--config` (if any) and merge it under the CLI values.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// CLI/env wins over file, file wins over defaults.
    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self> {
        let rpc_endpoint = cli
            .rpc_endpoint
            .clone()
            .or(file.rpc_endpoint)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                MonitorError::Config(
                    "GOAT_RPC_NODE environment variable (or --rpc-endpoint) is required".into(),
                )
            })?;
        validate_endpoint(&rpc_endpoint)?;

        let host = cli.host.or(file.host).unwrap_or(DEFAULT_HOST);
        let port = cli.port.or(file.port).unwrap_or(DEFAULT_PORT);

        let rpc_timeout = seconds(
            "rpc_timeout_secs",
            cli.rpc_timeout_secs.or(file.rpc_timeout_secs),
            DEFAULT_RPC_TIMEOUT,
        )?;
        let handler_timeout = seconds(
            "handler_timeout_secs",
            cli.handler_timeout_secs.or(file.handler_timeout_secs),
            DEFAULT_HANDLER_TIMEOUT,
        )?;

        let namespace = cli
            .namespace
            .clone()
            .or(file.namespace)
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        validate_namespace(&namespace)?;

        Ok(Self {
            rpc_endpoint,
            listen_addr: SocketAddr::new(host, port),
            rpc_timeout,
            handler_timeout,
            namespace,
        })
    }
}

fn seconds(key: &str, value: Option<u64>, default: Duration) -> Result<Duration> {
    match value {
        None => Ok(default),
        Some(0) => Err(MonitorError::Config(format!("{} must be greater than zero", key))),
        Some(s) => Ok(Duration::from_secs(s)),
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .map_err(|e| MonitorError::Config(format!("invalid RPC endpoint {:?}: {}", endpoint, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(MonitorError::Config(format!(
            "invalid RPC endpoint {:?}: unsupported scheme {:?}",
            endpoint, other
        ))),
    }
}

/// Metric name prefix: empty, or `[a-zA-Z_][a-zA-Z0-9_]*`.
fn validate_namespace(ns: &str) -> Result<()> {
    let mut chars = ns.chars();
    let valid = match chars.next() {
        None => true,
        Some(c) => (c.is_ascii_alphabetic() || c == '_') && chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
    };
    if valid {
        Ok(())
    } else {
        Err(MonitorError::Config(format!("invalid metric namespace {:?}", ns)))
    }
}
