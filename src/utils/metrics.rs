use prometheus::proto::MetricFamily;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

use crate::utils::Result;

pub const POLLS_TOTAL: &str = "monitor_polls_total";
pub const POLL_FAILURES_TOTAL: &str = "monitor_poll_failures_total";

/// The monitor's own cumulative counters, registered in a `prometheus::Registry`.
///
/// Clones share the same collectors. Per-scrape gauges are not kept here; they
/// are built from the snapshot of the scrape that produced them.
#[derive(Clone)]
pub struct MetricsRegistry {
    namespace: String,
    registry: Registry,
    polls: IntCounter,
    poll_failures: IntCounterVec,
}

impl MetricsRegistry {
    /// Counters are named `<namespace>_monitor_...`, or unprefixed when the
    /// namespace is empty.
    pub fn new(namespace: &str) -> Result<Self> {
        let polls = IntCounter::with_opts(
            Opts::new(POLLS_TOTAL, "number of node polls performed by the monitor").namespace(namespace),
        )?;
        let poll_failures = IntCounterVec::new(
            Opts::new(POLL_FAILURES_TOTAL, "number of failed node calls, by field and error kind")
                .namespace(namespace),
            &["field", "kind"],
        )?;

        let registry = Registry::new();
        registry.register(Box::new(polls.clone()))?;
        registry.register(Box::new(poll_failures.clone()))?;

        Ok(Self { namespace: namespace.to_string(), registry, polls, poll_failures })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn inc_polls(&self) {
        self.polls.inc();
    }

    pub fn inc_poll_failure(&self, field: &str, kind: &str) {
        self.poll_failures.with_label_values(&[field, kind]).inc();
    }

    /// Counter families ready for encoding. Failure series appear after their
    /// first increment.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }
}
