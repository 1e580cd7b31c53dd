//! Prometheus exposition of a snapshot.
//!
//! The four gauges are built in a fresh registry for every scrape, so a
//! response only ever reflects its own poll. The exporter's counters come from
//! the long-lived `MetricsRegistry`. Both are encoded with `TextEncoder`.

use prometheus::proto::MetricFamily;
use prometheus::{Encoder, IntGauge, Opts, Registry, TextEncoder};

use crate::collector::Snapshot;
use crate::utils::MetricsRegistry;

pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

pub const DEFAULT_NAMESPACE: &str = "goat";

/// Count one poll and each of its failed fields.
pub fn record_poll(metrics: &MetricsRegistry, snapshot: &Snapshot) {
    metrics.inc_polls();
    for err in snapshot.errors() {
        metrics.inc_poll_failure(err.field.as_str(), err.kind.as_str());
    }
}

/// Gauge families for one snapshot, sorted by name.
pub fn snapshot_families(namespace: &str, snapshot: &Snapshot) -> prometheus::Result<Vec<MetricFamily>> {
    let node = namespace_label(namespace);
    let gauges = [
        (
            "block_height",
            format!("current block height of the {} node", node),
            snapshot.block_height(),
        ),
        ("chain_id", format!("chain ID reported by the {} node", node), snapshot.chain_id()),
        (
            "syncing",
            format!("whether the {} node is syncing (1=syncing, 0=synced)", node),
            u64::from(snapshot.syncing()),
        ),
        (
            "rpc_up",
            format!("whether the {} RPC endpoint is reachable (1=up, 0=down)", node),
            u64::from(snapshot.rpc_up()),
        ),
    ];

    let registry = Registry::new();
    for (name, help, value) in gauges {
        let gauge = IntGauge::with_opts(Opts::new(name, help).namespace(namespace))?;
        gauge.set(i64::try_from(value).unwrap_or(i64::MAX));
        registry.register(Box::new(gauge))?;
    }
    Ok(registry.gather())
}

/// Text exposition: snapshot gauges first, then the exporter's counters.
pub fn render(snapshot: &Snapshot, metrics: &MetricsRegistry) -> prometheus::Result<String> {
    let mut families = snapshot_families(metrics.namespace(), snapshot)?;
    families.extend(metrics.gather());

    let mut buf = Vec::new();
    TextEncoder::new().encode(&families, &mut buf)?;
    String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

fn namespace_label(namespace: &str) -> &str {
    if namespace.is_empty() {
        "EVM"
    } else {
        namespace
    }
}
