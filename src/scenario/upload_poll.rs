use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::{Instant, sleep};
use tracing::{debug, error};
use url::Url;

use crate::args::FormField;
use crate::error::AppResult;
use crate::http::{
    RequestOutcome, SamplePool, build_multipart, execute_request_json, join_url,
    push_path_segments, validate_url,
};
use crate::metrics::Metrics;

use super::settings::{SampleSource, UploadPollSettings};
use super::upload::UPLOAD_METRIC;
use super::{IterationContext, Pause, Scenario};

/// Synthetic entry covering upload plus every poll of one job.
pub const COMPLETE_TASK_METRIC: &str = "Upload and Complete Task";

const STATUS_METRIC: &str = "status";
const UPLOAD_OK_CHECK: &str = "upload status is 200";
const JOB_ID_CHECK: &str = "response has jobID";
const COMPLETED_CHECK: &str = "job completed";

const UPLOAD_OK_STATUS: u16 = 200;
const COMPLETED_STATUS: &str = "completed";

/// Uploads a sample, then polls `/status/{jobID}` until the job completes.
#[derive(Debug)]
pub struct UploadPollScenario {
    upload_url: Url,
    base_url: Url,
    samples: SamplePool,
    field: String,
    form: Vec<FormField>,
    poll_interval: Duration,
    poll_timeout: Duration,
    wait: Pause,
}

impl UploadPollScenario {
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or samples cannot be loaded.
    pub fn new(settings: UploadPollSettings) -> AppResult<Self> {
        let base_url = validate_url(&settings.base_url)?;
        let upload_url = join_url(&base_url, "upload")?;
        let samples = match &settings.samples {
            SampleSource::Files(paths) => SamplePool::from_files(paths)?,
            SampleSource::WeightedDir(dir) => SamplePool::weighted_from_dir(dir)?,
        };
        Ok(Self {
            upload_url,
            base_url,
            samples,
            field: settings.field,
            form: settings.form,
            poll_interval: settings.poll_interval,
            poll_timeout: settings.poll_timeout,
            wait: Pause::Uniform {
                min: settings.wait_min,
                max: settings.wait_max,
            },
        })
    }

    async fn upload(&self, ctx: &IterationContext<'_>) -> Option<(RequestOutcome, String)> {
        let Some(sample) = self.samples.pick() else {
            error!("Sample pool is empty.");
            return None;
        };
        let form = match build_multipart(&self.field, &self.form, sample) {
            Ok(form) => form,
            Err(err) => {
                error!("Failed to build upload form: {}", err);
                ctx.checks.record(UPLOAD_OK_CHECK, false);
                return None;
            }
        };

        let start = Instant::now();
        let (outcome, body) =
            execute_request_json(ctx.client.post(self.upload_url.clone()).multipart(form)).await;
        ctx.record(Metrics::new(UPLOAD_METRIC, start, outcome)).await;

        if !ctx
            .checks
            .record(UPLOAD_OK_CHECK, outcome.status_is(UPLOAD_OK_STATUS))
        {
            return None;
        }
        let job_id = body.as_ref().and_then(job_id_from);
        ctx.checks.record(JOB_ID_CHECK, job_id.is_some());
        job_id.map(|id| (outcome, id))
    }

    async fn poll_until_complete(&self, ctx: &IterationContext<'_>, job_id: &str) -> bool {
        let status_url = match push_path_segments(&self.base_url, &["status", job_id]) {
            Ok(url) => url,
            Err(err) => {
                error!("Invalid status URL for job '{}': {}", job_id, err);
                return false;
            }
        };
        let give_up_at = Instant::now().checked_add(self.poll_timeout);

        loop {
            let start = Instant::now();
            let (outcome, body) = execute_request_json(ctx.client.get(status_url.clone())).await;
            ctx.record(Metrics::new(STATUS_METRIC, start, outcome)).await;

            let status = body
                .as_ref()
                .and_then(|value| value.get("status"))
                .and_then(Value::as_str);
            if status == Some(COMPLETED_STATUS) {
                return true;
            }
            debug!("Job '{}' status: {:?}", job_id, status);

            let next_poll = Instant::now().checked_add(self.poll_interval);
            if let (Some(next_poll), Some(give_up_at)) = (next_poll, give_up_at)
                && next_poll > give_up_at
            {
                debug!("Giving up on job '{}' after {:?}", job_id, self.poll_timeout);
                return false;
            }
            sleep(self.poll_interval).await;
        }
    }
}

fn job_id_from(body: &Value) -> Option<String> {
    let raw = body.get("jobID")?;
    let id = match raw {
        Value::String(id) => id.clone(),
        Value::Number(id) => id.to_string(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
    };
    if id.is_empty() { None } else { Some(id) }
}

#[async_trait]
impl Scenario for UploadPollScenario {
    fn name(&self) -> &'static str {
        "upload-poll"
    }

    fn check_names(&self) -> Vec<String> {
        [UPLOAD_OK_CHECK, JOB_ID_CHECK, COMPLETED_CHECK]
            .iter()
            .map(|name| (*name).to_owned())
            .collect()
    }

    fn pause(&self) -> Pause {
        self.wait
    }

    async fn iteration(&self, ctx: &IterationContext<'_>) {
        let task_start = Instant::now();
        let Some((upload_outcome, job_id)) = self.upload(ctx).await else {
            return;
        };
        let completed = self.poll_until_complete(ctx, &job_id).await;
        ctx.checks.record(COMPLETED_CHECK, completed);
        if completed {
            ctx.record(Metrics::new(COMPLETE_TASK_METRIC, task_start, upload_outcome))
                .await;
        }
    }
}
