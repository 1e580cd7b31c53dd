use axum::http::StatusCode;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::collector::Snapshot;
use crate::rpc::SyncProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

/// JSON document served on `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub node_endpoint: String,
    pub block_height: u64,
    pub chain_id: u64,
    pub syncing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_progress: Option<SyncProgress>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn from_snapshot(endpoint: &str, snapshot: &Snapshot, now: DateTime<Utc>) -> Self {
        let status = if snapshot.errors().is_empty() { HealthStatus::Ok } else { HealthStatus::Degraded };
        Self {
            status,
            node_endpoint: endpoint.to_string(),
            block_height: snapshot.block_height(),
            chain_id: snapshot.chain_id(),
            syncing: snapshot.syncing(),
            sync_progress: snapshot.sync_progress(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            error: snapshot.error_summary(),
        }
    }

    /// 200 when healthy, 503 when any field failed.
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Ok => StatusCode::OK,
            HealthStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut body = serde_json::to_string_pretty(self)?;
        body.push('\n');
        Ok(body)
    }
}
