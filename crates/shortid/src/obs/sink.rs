//! Metrics sink boundary.
//!
//! Field and executor logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics::{self, EntityCounters, EventOps, EventReport};

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    CandidateGenerated { entity_path: &'static str },
    ExistsQuery { entity_path: &'static str },
    Collision { entity_path: &'static str },
    Exhausted { entity_path: &'static str },
    SaveCall { entity_path: &'static str },
    RowWritten { entity_path: &'static str },
    WriteConflict { entity_path: &'static str },
}

impl MetricsEvent {
    #[must_use]
    pub const fn entity_path(&self) -> &'static str {
        match *self {
            Self::CandidateGenerated { entity_path }
            | Self::ExistsQuery { entity_path }
            | Self::Collision { entity_path }
            | Self::Exhausted { entity_path }
            | Self::SaveCall { entity_path }
            | Self::RowWritten { entity_path }
            | Self::WriteConflict { entity_path } => entity_path,
        }
    }
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counter state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| {
            bump_ops(&mut m.ops, event);

            let entry = m
                .entities
                .entry(event.entity_path().to_string())
                .or_default();
            bump_entity(entry, event);
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    GLOBAL_METRICS_SINK.record(event);
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::report()
}

/// Reset the current thread's metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

const fn bump_ops(ops: &mut EventOps, event: MetricsEvent) {
    let counter = match event {
        MetricsEvent::CandidateGenerated { .. } => &mut ops.candidates_generated,
        MetricsEvent::ExistsQuery { .. } => &mut ops.exists_calls,
        MetricsEvent::Collision { .. } => &mut ops.collisions,
        MetricsEvent::Exhausted { .. } => &mut ops.exhaustions,
        MetricsEvent::SaveCall { .. } => &mut ops.save_calls,
        MetricsEvent::RowWritten { .. } => &mut ops.rows_written,
        MetricsEvent::WriteConflict { .. } => &mut ops.write_conflicts,
    };
    *counter = counter.saturating_add(1);
}

const fn bump_entity(entry: &mut EntityCounters, event: MetricsEvent) {
    let counter = match event {
        MetricsEvent::CandidateGenerated { .. } => &mut entry.candidates_generated,
        MetricsEvent::ExistsQuery { .. } => &mut entry.exists_calls,
        MetricsEvent::Collision { .. } => &mut entry.collisions,
        MetricsEvent::Exhausted { .. } => &mut entry.exhaustions,
        MetricsEvent::SaveCall { .. } => &mut entry.save_calls,
        MetricsEvent::RowWritten { .. } => &mut entry.rows_written,
        MetricsEvent::WriteConflict { .. } => &mut entry.write_conflicts,
    };
    *counter = counter.saturating_add(1);
}

///
/// TESTS
///
