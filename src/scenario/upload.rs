use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::error;
use url::Url;

use crate::args::FormField;
use crate::error::AppResult;
use crate::http::{SampleFile, build_multipart, execute_request, validate_url};
use crate::metrics::Metrics;

use super::settings::UploadSettings;
use super::{IterationContext, Pause, Scenario};

/// Request name the upload is reported under.
pub(super) const UPLOAD_METRIC: &str = "upload";

/// Posts the same sample on every iteration and checks the status code.
#[derive(Debug)]
pub struct UploadScenario {
    url: Url,
    field: String,
    form: Vec<FormField>,
    sample: Arc<SampleFile>,
    expected_status: u16,
    check_name: String,
}

impl UploadScenario {
    /// Validates the URL and reads the sample before any traffic.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is invalid or the sample cannot be read.
    pub fn new(settings: UploadSettings) -> AppResult<Self> {
        let url = validate_url(&settings.url)?;
        let sample = SampleFile::load(&settings.file)?;
        build_multipart(&settings.field, &settings.form, &sample)?;
        Ok(Self {
            url,
            field: settings.field,
            form: settings.form,
            sample: Arc::new(sample),
            expected_status: settings.expected_status,
            check_name: format!("status is {}", settings.expected_status),
        })
    }
}

#[async_trait]
impl Scenario for UploadScenario {
    fn name(&self) -> &'static str {
        "upload"
    }

    fn check_names(&self) -> Vec<String> {
        vec![self.check_name.clone()]
    }

    fn pause(&self) -> Pause {
        Pause::None
    }

    async fn iteration(&self, ctx: &IterationContext<'_>) {
        let form = match build_multipart(&self.field, &self.form, &self.sample) {
            Ok(form) => form,
            Err(err) => {
                error!("Failed to build upload form: {}", err);
                ctx.checks.record(&self.check_name, false);
                return;
            }
        };
        let start = Instant::now();
        let outcome = execute_request(ctx.client.post(self.url.clone()).multipart(form)).await;
        ctx.record(Metrics::new(UPLOAD_METRIC, start, outcome)).await;
        ctx.checks
            .record(&self.check_name, outcome.status_is(self.expected_status));
    }
}
