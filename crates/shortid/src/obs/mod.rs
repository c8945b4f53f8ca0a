//! Observability: generation and save counters behind a sink boundary.
//!
//! Field and executor code records `MetricsEvent`s through `sink::record`
//! and never touches the counter state directly. Log lines go through
//! `tracing` at the call sites.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
