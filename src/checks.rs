//! Named pass/fail assertions recorded per iteration.
//!
//! A check never aborts an iteration by itself; it only counts. Names are
//! registered up front so recording is a lock-free counter bump.
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::warn;

#[derive(Debug)]
struct CheckCounter {
    name: String,
    passes: AtomicU64,
    fails: AtomicU64,
}

#[derive(Debug, Default)]
pub struct CheckRegistry {
    checks: Vec<CheckCounter>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub passes: u64,
    pub fails: u64,
}

impl CheckResult {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.passes.saturating_add(self.fails)
    }

    /// Pass rate in hundredths of a percent (10_000 == 100%).
    #[must_use]
    pub fn pass_rate_x100(&self) -> u64 {
        let scaled = u128::from(self.passes)
            .saturating_mul(10_000)
            .checked_div(u128::from(self.total()))
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

impl CheckRegistry {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            checks: names
                .into_iter()
                .map(|name| CheckCounter {
                    name: name.into(),
                    passes: AtomicU64::new(0),
                    fails: AtomicU64::new(0),
                })
                .collect(),
        }
    }

    /// Records one evaluation and returns `passed` so callers can branch on it.
    pub fn record(&self, name: &str, passed: bool) -> bool {
        let Some(counter) = self.checks.iter().find(|check| check.name == name) else {
            warn!("Check '{}' was not registered; result dropped.", name);
            return passed;
        };
        let target = if passed {
            &counter.passes
        } else {
            &counter.fails
        };
        target.fetch_add(1, Ordering::Relaxed);
        passed
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<CheckResult> {
        self.checks
            .iter()
            .map(|check| CheckResult {
                name: check.name.clone(),
                passes: check.passes.load(Ordering::Relaxed),
                fails: check.fails.load(Ordering::Relaxed),
            })
            .collect()
    }
}

/// Totals across all checks: `(passes, fails)`.
#[must_use]
pub fn totals(results: &[CheckResult]) -> (u64, u64) {
    results.iter().fold((0u64, 0u64), |(passes, fails), result| {
        (
            passes.saturating_add(result.passes),
            fails.saturating_add(result.fails),
        )
    })
}
