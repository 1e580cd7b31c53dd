use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::error;

use crate::api::exposition;
use crate::api::health::HealthReport;
use crate::collector::{Snapshot, SnapshotAggregator};
use crate::utils::MetricsRegistry;

/// Everything a request handler needs; shared by all routes.
pub struct AppState {
    aggregator: SnapshotAggregator,
    metrics: MetricsRegistry,
}

impl AppState {
    pub fn new(aggregator: SnapshotAggregator, metrics: MetricsRegistry) -> Self {
        Self { aggregator, metrics }
    }

    pub fn endpoint(&self) -> &str {
        self.aggregator.client().endpoint()
    }

    /// Poll the node once and count the outcome.
    pub async fn poll(&self) -> Snapshot {
        let snapshot = self.aggregator.poll().await;
        exposition::record_poll(&self.metrics, &snapshot);
        snapshot
    }
}

/// GET /metrics
pub async fn metrics(Extension(state): Extension<Arc<AppState>>) -> Response {
    let snapshot = state.poll().await;
    match exposition::render(&snapshot, &state.metrics) {
        Ok(body) => ([(header::CONTENT_TYPE, exposition::CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!("error encoding metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /health
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Response {
    let snapshot = state.poll().await;
    let report = HealthReport::from_snapshot(state.endpoint(), &snapshot, Utc::now());
    match report.to_json() {
        Ok(body) => (report.http_status(), [(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!("error encoding health response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET / redirects to the health document.
pub async fn root() -> Redirect {
    Redirect::temporary("/health")
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}
