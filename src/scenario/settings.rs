use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::args::FormField;
use crate::error::{AppError, AppResult, ValidationError};

use super::{Scenario, TranslateScenario, UploadPollScenario, UploadScenario};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub url: String,
    pub file: PathBuf,
    pub field: String,
    pub form: Vec<FormField>,
    pub expected_status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateSettings {
    pub url: String,
    pub think_time: Duration,
}

/// Where upload-poll samples come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSource {
    /// Listed files, equally likely.
    Files(Vec<PathBuf>),
    /// L-*/M-*/S-* images in a directory, weighted by size class.
    WeightedDir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPollSettings {
    pub base_url: String,
    pub samples: SampleSource,
    pub field: String,
    pub form: Vec<FormField>,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
    pub wait_min: Duration,
    pub wait_max: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioSettings {
    Upload(UploadSettings),
    Translate(TranslateSettings),
    UploadPoll(UploadPollSettings),
}

impl ScenarioSettings {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            ScenarioSettings::Upload(_) => "upload",
            ScenarioSettings::Translate(_) => "translate",
            ScenarioSettings::UploadPoll(_) => "upload-poll",
        }
    }

    /// Validates the settings and loads every sample file.
    ///
    /// # Errors
    ///
    /// Returns an error when a URL is invalid, a sample cannot be read, or the
    /// wait range is inverted.
    pub fn build(self) -> AppResult<Arc<dyn Scenario>> {
        match self {
            ScenarioSettings::Upload(settings) => Ok(Arc::new(UploadScenario::new(settings)?)),
            ScenarioSettings::Translate(settings) => {
                Ok(Arc::new(TranslateScenario::new(settings)?))
            }
            ScenarioSettings::UploadPoll(settings) => {
                if settings.wait_min > settings.wait_max {
                    return Err(AppError::validation(ValidationError::WaitRangeInverted));
                }
                Ok(Arc::new(UploadPollScenario::new(settings)?))
            }
        }
    }
}
