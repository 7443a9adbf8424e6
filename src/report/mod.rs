//! End-of-run output: text summary, JSON report and the check threshold.
mod json;
mod text;


use crate::checks::totals;
use crate::error::{AppError, AppResult};
use crate::runner::RunReport;

pub use json::{JsonReport, render_json};
pub use text::{SummaryStats, compute_summary_stats, print_summary};

/// Fails the run when the share of failed checks exceeds `limit_pct`.
///
/// # Errors
///
/// Returns [`AppError::ChecksFailed`] when the limit is exceeded.
pub fn enforce_check_threshold(report: &RunReport, limit_pct: Option<u8>) -> AppResult<()> {
    let Some(limit_pct) = limit_pct else {
        return Ok(());
    };
    let (passes, fails) = totals(&report.checks);
    let total = passes.saturating_add(fails);
    if total == 0 {
        return Ok(());
    }
    // fails / total > limit / 100, kept in integers.
    let lhs = u128::from(fails).saturating_mul(100);
    let rhs = u128::from(total).saturating_mul(u128::from(limit_pct));
    if lhs > rhs {
        return Err(AppError::ChecksFailed {
            failed: fails,
            total,
            limit_pct,
        });
    }
    Ok(())
}
