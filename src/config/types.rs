use std::path::PathBuf;

use serde::Deserialize;

use crate::args::OutputFormat;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    Upload,
    Translate,
    UploadPoll,
}

impl ScenarioKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::Upload => "upload",
            ScenarioKind::Translate => "translate",
            ScenarioKind::UploadPoll => "upload-poll",
        }
    }

    /// Scenario-specific keys this scenario reads.
    pub(super) const fn accepted_fields(self) -> &'static [&'static str] {
        match self {
            ScenarioKind::Upload => &["url", "file", "field", "form", "expected_status"],
            ScenarioKind::Translate => &["url", "think_time"],
            ScenarioKind::UploadPoll => &[
                "base_url",
                "files",
                "samples_dir",
                "field",
                "form",
                "poll_interval",
                "poll_timeout",
                "wait_min",
                "wait_max",
            ],
        }
    }
}

/// A run described in `ocrbench.toml` / `ocrbench.json`. Keys mirror the CLI flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub scenario: ScenarioKind,
    pub vus: Option<usize>,
    pub duration: Option<DurationValue>,
    pub graceful_stop: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub max_check_failures_pct: Option<u8>,
    pub output_format: Option<OutputFormat>,

    pub url: Option<String>,
    pub base_url: Option<String>,
    pub file: Option<PathBuf>,
    pub files: Option<Vec<PathBuf>>,
    pub samples_dir: Option<PathBuf>,
    pub field: Option<String>,
    pub form: Option<Vec<String>>,
    pub expected_status: Option<u16>,
    pub think_time: Option<DurationValue>,
    pub poll_interval: Option<DurationValue>,
    pub poll_timeout: Option<DurationValue>,
    pub wait_min: Option<DurationValue>,
    pub wait_max: Option<DurationValue>,
}

impl ConfigFile {
    /// Scenario-specific keys present in the file.
    pub(super) fn scenario_fields(&self) -> Vec<&'static str> {
        [
            ("url", self.url.is_some()),
            ("base_url", self.base_url.is_some()),
            ("file", self.file.is_some()),
            ("files", self.files.is_some()),
            ("samples_dir", self.samples_dir.is_some()),
            ("field", self.field.is_some()),
            ("form", self.form.is_some()),
            ("expected_status", self.expected_status.is_some()),
            ("think_time", self.think_time.is_some()),
            ("poll_interval", self.poll_interval.is_some()),
            ("poll_timeout", self.poll_timeout.is_some()),
            ("wait_min", self.wait_min.is_some()),
            ("wait_max", self.wait_max.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

/// `30` (seconds) or `"500ms"`, `"2m"`, ...
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}
