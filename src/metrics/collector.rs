use std::collections::BTreeMap;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::warn;

use super::{LatencyHistogram, Metrics, MetricsSummary, RequestStats};

struct RequestAccumulator {
    stats: RequestStats,
    latency_sum_ms: u128,
    histogram: Option<LatencyHistogram>,
}

impl RequestAccumulator {
    fn new(name: &str) -> Self {
        let histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                warn!("Failed to initialize latency histogram: {}", err);
                None
            }
        };
        Self {
            stats: RequestStats {
                name: name.to_owned(),
                min_latency_ms: u64::MAX,
                ..RequestStats::default()
            },
            latency_sum_ms: 0,
            histogram,
        }
    }

    fn record(&mut self, metric: &Metrics) {
        let latency_ms = u64::try_from(metric.response_time.as_millis()).unwrap_or(u64::MAX);
        let stats = &mut self.stats;
        stats.total_requests = stats.total_requests.saturating_add(1);
        stats.response_bytes = stats
            .response_bytes
            .saturating_add(metric.outcome.response_bytes);
        if let Some(status) = metric.outcome.status {
            let count = stats.status_counts.entry(status).or_insert(0);
            *count = count.saturating_add(1);
        }
        if metric.outcome.timed_out {
            stats.timeouts = stats.timeouts.saturating_add(1);
        }
        if metric.outcome.transport_error {
            stats.transport_errors = stats.transport_errors.saturating_add(1);
        }
        stats.min_latency_ms = stats.min_latency_ms.min(latency_ms);
        stats.max_latency_ms = stats.max_latency_ms.max(latency_ms);
        self.latency_sum_ms = self.latency_sum_ms.saturating_add(u128::from(latency_ms));
        if let Some(histogram) = self.histogram.as_mut()
            && let Err(err) = histogram.record(latency_ms)
        {
            warn!("{}", err);
        }
    }

    fn finish(self) -> RequestStats {
        let mut stats = self.stats;
        if stats.total_requests == 0 {
            stats.min_latency_ms = 0;
            return stats;
        }
        let avg = self
            .latency_sum_ms
            .checked_div(u128::from(stats.total_requests))
            .unwrap_or(0);
        stats.avg_latency_ms = u64::try_from(avg).unwrap_or(u64::MAX);
        if let Some(histogram) = self.histogram.as_ref() {
            let (p50, p90, p99) = histogram.percentiles();
            stats.p50_latency_ms = p50;
            stats.p90_latency_ms = p90;
            stats.p99_latency_ms = p99;
        }
        stats
    }
}

/// Spawns the aggregation task. It ends once every sender is dropped and
/// yields per-name statistics ordered by name.
#[must_use]
pub fn setup_metrics_collector(mut metrics_rx: mpsc::Receiver<Metrics>) -> JoinHandle<MetricsSummary> {
    tokio::spawn(async move {
        let mut by_name: BTreeMap<&'static str, RequestAccumulator> = BTreeMap::new();
        let mut total_requests: u64 = 0;

        while let Some(metric) = metrics_rx.recv().await {
            total_requests = total_requests.saturating_add(1);
            by_name
                .entry(metric.name)
                .or_insert_with(|| RequestAccumulator::new(metric.name))
                .record(&metric);
        }

        MetricsSummary {
            total_requests,
            requests: by_name
                .into_values()
                .map(RequestAccumulator::finish)
                .collect(),
        }
    })
}
