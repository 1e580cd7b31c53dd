//! HTTP API module
//!
//! - `/metrics`: Prometheus text exposition of a fresh snapshot
//! - `/health`: JSON health document, 503 when degraded
//! - `/`: redirects to `/health`
//!
//! Every request runs its own poll against the node; nothing is cached.

pub mod exposition;
pub mod handlers;
pub mod health;
pub mod server;

pub use handlers::AppState;
pub use health::{HealthReport, HealthStatus};
pub use server::{router, MonitorServer, DEFAULT_HANDLER_TIMEOUT};
