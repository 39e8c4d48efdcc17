//! Sink counter export
//!
//! Publishes `LogDispatcher` sink counters through the `metrics` facade.

use dispatcher::{LogDispatcher, MetricsSnapshot};
use metrics::gauge;

/// Record one sink's counters as gauges labelled with the sink name
///
/// # Example
///
/// ```ignore
/// for (sink, snapshot) in logger.metrics() {
///     observability::metrics::record_sink_metrics(&sink, &snapshot);
/// }
/// ```
pub fn record_sink_metrics(sink: &str, snapshot: &MetricsSnapshot) {
    let sink = sink.to_string();

    gauge!("logcast_sink_writes", "sink" => sink.clone()).set(snapshot.write_count as f64);
    gauge!("logcast_sink_failures", "sink" => sink.clone()).set(snapshot.failure_count as f64);
    gauge!("logcast_sink_dropped", "sink" => sink.clone()).set(snapshot.dropped_count as f64);
    gauge!("logcast_sink_queue_len", "sink" => sink).set(snapshot.queue_len as f64);
}

/// Record every active sink of a dispatcher
pub fn record_dispatcher_metrics(dispatcher: &LogDispatcher) {
    for (sink, snapshot) in dispatcher.metrics() {
        record_sink_metrics(&sink, &snapshot);
    }
}

/// Totals across sinks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSummary {
    pub writes: u64,
    pub failures: u64,
    pub dropped: u64,
}

impl MetricsSummary {
    /// Sum per-sink snapshots
    pub fn from_snapshots<'a>(snapshots: impl IntoIterator<Item = &'a MetricsSnapshot>) -> Self {
        snapshots
            .into_iter()
            .fold(Self::default(), |acc, s| Self {
                writes: acc.writes + s.write_count,
                failures: acc.failures + s.failure_count,
                dropped: acc.dropped + s.dropped_count,
            })
    }

    /// Fraction of attempted writes that were lost (failed or dropped)
    pub fn loss_ratio(&self) -> f64 {
        let lost = self.failures + self.dropped;
        let attempted = self.writes + lost;
        if attempted == 0 {
            0.0
        } else {
            lost as f64 / attempted as f64
        }
    }
}
