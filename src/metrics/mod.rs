//! Per-request metrics, aggregation, and histogram utilities.
mod collector;
mod histogram;
mod types;


pub use collector::setup_metrics_collector;
pub use histogram::LatencyHistogram;
pub use types::{Metrics, MetricsSummary, RequestStats};
