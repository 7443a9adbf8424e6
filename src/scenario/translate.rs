use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use url::Url;

use crate::error::AppResult;
use crate::http::{execute_request, validate_url};
use crate::metrics::Metrics;

use super::settings::TranslateSettings;
use super::{IterationContext, Pause, Scenario};

const TRANSLATE_METRIC: &str = "translate";

/// One GET per iteration followed by a fixed pause. Nothing is asserted.
#[derive(Debug)]
pub struct TranslateScenario {
    url: Url,
    think_time: Duration,
}

impl TranslateScenario {
    /// # Errors
    ///
    /// Returns an error when the URL is invalid.
    pub fn new(settings: TranslateSettings) -> AppResult<Self> {
        Ok(Self {
            url: validate_url(&settings.url)?,
            think_time: settings.think_time,
        })
    }
}

#[async_trait]
impl Scenario for TranslateScenario {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn check_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn pause(&self) -> Pause {
        Pause::Fixed(self.think_time)
    }

    async fn iteration(&self, ctx: &IterationContext<'_>) {
        let start = Instant::now();
        let outcome = execute_request(ctx.client.get(self.url.clone())).await;
        ctx.record(Metrics::new(TRANSLATE_METRIC, start, outcome))
            .await;
    }
}
