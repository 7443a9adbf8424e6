//! Virtual-user scenario bodies and the settings they are built from.
mod settings;
mod translate;
mod upload;
mod upload_poll;

#[cfg(test)]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use tokio::sync::mpsc;
use tracing::debug;

use crate::checks::CheckRegistry;
use crate::metrics::Metrics;

pub use settings::{
    SampleSource, ScenarioSettings, TranslateSettings, UploadPollSettings, UploadSettings,
};
pub use translate::TranslateScenario;
pub use upload::UploadScenario;
pub use upload_poll::{COMPLETE_TASK_METRIC, UploadPollScenario};

/// What a virtual user does between two iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    None,
    Fixed(Duration),
    /// Uniformly random in `[min, max]`.
    Uniform { min: Duration, max: Duration },
}

impl Pause {
    #[must_use]
    pub fn sample(&self) -> Option<Duration> {
        match *self {
            Pause::None => None,
            Pause::Fixed(duration) => Some(duration),
            Pause::Uniform { min, max } => {
                let min_ms = u64::try_from(min.as_millis()).unwrap_or(u64::MAX);
                let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
                if max_ms <= min_ms {
                    return Some(min);
                }
                Some(Duration::from_millis(
                    rand::thread_rng().gen_range(min_ms..=max_ms),
                ))
            }
        }
    }
}

/// Per-iteration handles a scenario body records into.
pub struct IterationContext<'ctx> {
    pub client: &'ctx Client,
    pub checks: &'ctx CheckRegistry,
    pub metrics_tx: &'ctx mpsc::Sender<Metrics>,
}

impl IterationContext<'_> {
    pub async fn record(&self, metric: Metrics) {
        if self.metrics_tx.send(metric).await.is_err() {
            debug!("Metrics collector closed; dropping '{}' sample.", metric.name);
        }
    }
}

/// One virtual-user loop body.
#[async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &'static str;

    /// Checks this scenario may record, in report order.
    fn check_names(&self) -> Vec<String>;

    fn pause(&self) -> Pause;

    async fn iteration(&self, ctx: &IterationContext<'_>);
}
