//! Utility module: errors, logging and the metrics registry.

pub mod errors;
pub mod metrics;
pub mod logging;

pub use errors::{MonitorError, Result};
pub use metrics::MetricsRegistry;
pub use logging::init_logging;
