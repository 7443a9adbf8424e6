use serde::Serialize;

use crate::checks::CheckResult;
use crate::error::AppResult;
use crate::metrics::RequestStats;
use crate::runner::RunReport;

#[derive(Debug, Serialize)]
pub struct JsonReport<'report> {
    pub scenario: &'static str,
    pub vus: usize,
    pub planned_duration_ms: u64,
    pub elapsed_ms: u64,
    pub iterations: u64,
    pub interrupted_iterations: u64,
    pub stopped_by_signal: bool,
    pub total_requests: u64,
    pub requests: &'report [RequestStats],
    pub checks: &'report [CheckResult],
}

impl<'report> From<&'report RunReport> for JsonReport<'report> {
    fn from(report: &'report RunReport) -> Self {
        Self {
            scenario: report.scenario,
            vus: report.vus,
            planned_duration_ms: u64::try_from(report.planned_duration.as_millis())
                .unwrap_or(u64::MAX),
            elapsed_ms: u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
            iterations: report.iterations,
            interrupted_iterations: report.interrupted_iterations,
            stopped_by_signal: report.stopped_by_signal,
            total_requests: report.metrics.total_requests,
            requests: &report.metrics.requests,
            checks: &report.checks,
        }
    }
}

/// Pretty-printed JSON for one run.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(report: &RunReport) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::from(report))?)
}
