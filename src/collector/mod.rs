//! Snapshot aggregation over the RPC client.

pub mod aggregator;
pub mod snapshot;

pub use aggregator::SnapshotAggregator;
pub use snapshot::{Field, FieldError, Snapshot, SnapshotBuilder};
