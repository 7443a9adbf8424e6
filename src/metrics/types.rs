use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::http::RequestOutcome;

/// One completed request, tagged with the name it is reported under.
#[derive(Clone, Copy, Debug)]
pub struct Metrics {
    pub name: &'static str,
    pub start: Instant,
    pub response_time: Duration,
    pub outcome: RequestOutcome,
}

impl Metrics {
    #[must_use]
    pub fn new(name: &'static str, start: Instant, outcome: RequestOutcome) -> Self {
        Self {
            name,
            start,
            response_time: start.elapsed(),
            outcome,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RequestStats {
    pub name: String,
    pub total_requests: u64,
    /// Responses by HTTP status code.
    pub status_counts: BTreeMap<u16, u64>,
    pub timeouts: u64,
    pub transport_errors: u64,
    pub response_bytes: u64,
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    pub avg_latency_ms: u64,
    pub p50_latency_ms: u64,
    pub p90_latency_ms: u64,
    pub p99_latency_ms: u64,
}

impl RequestStats {
    #[must_use]
    pub fn status_count(&self, status: u16) -> u64 {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSummary {
    pub total_requests: u64,
    pub requests: Vec<RequestStats>,
}

impl MetricsSummary {
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RequestStats> {
        self.requests.iter().find(|stats| stats.name == name)
    }
}
