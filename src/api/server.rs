use axum::{extract::Extension, routing::get, Router};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{self, AppState};
use crate::utils::{MonitorError, Result};

/// Wall-clock cap on one request; three sequential 10s RPC calls must fit.
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(35);

/// Build the router: `/metrics`, `/health`, `/` (redirect), 404 otherwise.
pub fn router(state: Arc<AppState>, handler_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(handler_timeout))
                .layer(Extension(state)),
        )
}

/// MonitorServer serves the router on an already-bound listener.
pub struct MonitorServer {
    listener: TcpListener,
    state: Arc<AppState>,
    handler_timeout: Duration,
}

impl MonitorServer {
    /// Bind the listen address up front so address errors surface at startup.
    pub fn bind(addr: SocketAddr, state: Arc<AppState>, handler_timeout: Duration) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(Self { listener, state, handler_timeout })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` flips to true (or its sender is dropped).
    pub async fn serve(self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr = self.local_addr()?;
        let app = router(self.state, self.handler_timeout);

        info!("Starting monitor HTTP server on {}", addr);
        axum::Server::from_tcp(self.listener)
            .map_err(|e| MonitorError::Server(e.to_string()))?
            .serve(app.into_make_service())
            .with_graceful_shutdown(async move {
                while !*shutdown.borrow() {
                    if shutdown.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await
            .map_err(|e| MonitorError::Server(e.to_string()))?;
        info!("monitor HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::SnapshotAggregator;
    use crate::rpc::client::tests::FakeNode;
    use crate::rpc::RpcClient;
    use crate::utils::MetricsRegistry;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(node: FakeNode) -> Router {
        let client = RpcClient::new("http://node.invalid:8545", Arc::new(node));
        let state = AppState::new(
            SnapshotAggregator::new(Arc::new(client)),
            MetricsRegistry::new("goat").unwrap(),
        );
        router(Arc::new(state), DEFAULT_HANDLER_TIMEOUT)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, header::HeaderMap, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = hyper::body::to_bytes(resp.into_body()).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_ok() {
        let (status, headers, body) = get(app(FakeNode::healthy()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        let v: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["block_height"], 10_235_456);
        assert_eq!(v["node_endpoint"], "http://node.invalid:8545");
        assert!(v.get("error").is_none());
    }

    #[tokio::test]
    async fn test_health_degraded_is_503() {
        let node = FakeNode::healthy().reply_raw("eth_chainId", 502, "bad gateway");
        let (status, _, body) = get(app(node), "/health").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let v: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["status"], "degraded");
        assert_eq!(v["chain_id"], 0);
        assert_eq!(v["block_height"], 10_235_456);
        assert!(v["error"].as_str().unwrap().starts_with("chain id: transport error: RPC returned HTTP 502"));
    }

    #[tokio::test]
    async fn test_metrics_scrape() {
        let (status, headers, body) = get(app(FakeNode::healthy()), "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain; version=0.0.4");
        assert!(body.contains("\ngoat_block_height 10235456\n"));
        assert!(body.contains("\ngoat_chain_id 2345\n"));
        assert!(body.contains("\ngoat_syncing 0\n"));
        assert!(body.contains("\ngoat_rpc_up 1\n"));
        assert!(body.contains("\ngoat_monitor_polls_total 1\n"));
    }

    #[tokio::test]
    async fn test_metrics_still_served_when_node_down() {
        let (status, _, body) = get(app(FakeNode::default()), "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\ngoat_rpc_up 0\n"));
        assert!(body.contains("goat_monitor_poll_failures_total{field=\"sync_status\",kind=\"transport\"} 1\n"));
    }

    #[tokio::test]
    async fn test_root_redirects_and_unknown_404() {
        let (status, headers, _) = get(app(FakeNode::healthy()), "/").await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(headers[header::LOCATION], "/health");

        let (status, _, _) = get(app(FakeNode::healthy()), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
