use std::path::PathBuf;
use std::time::Duration;

use crate::args::{
    DEFAULT_BASE_URL, DEFAULT_DURATION, DEFAULT_EXPECTED_STATUS, DEFAULT_FORM_FIELD,
    DEFAULT_GRACEFUL_STOP, DEFAULT_POLL_FORM, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SAMPLE_FILE, DEFAULT_SAMPLES_DIR, DEFAULT_THINK_TIME,
    DEFAULT_TRANSLATE_URL, DEFAULT_TRANSLATE_VUS, DEFAULT_UPLOAD_URL, DEFAULT_UPLOAD_VUS,
    DEFAULT_WAIT_MAX, DEFAULT_WAIT_MIN, FormField, LoadArgs, OutputFormat, PositiveUsize,
    parse_form_field,
};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::runner::LoadOptions;
use crate::scenario::{
    SampleSource, ScenarioSettings, TranslateSettings, UploadPollSettings, UploadSettings,
};

use super::parse::duration_field;
use super::types::{ConfigFile, ScenarioKind};

/// Highest accepted value for `max_check_failures_pct`.
const MAX_PERCENT: u8 = 100;

/// Everything needed to start one load run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPlan {
    pub settings: ScenarioSettings,
    pub load: LoadOptions,
    pub request_timeout: Duration,
    pub max_check_failures_pct: Option<u8>,
    pub output_format: OutputFormat,
}

const fn default_vus(kind: ScenarioKind) -> usize {
    match kind {
        ScenarioKind::Translate => DEFAULT_TRANSLATE_VUS,
        ScenarioKind::Upload | ScenarioKind::UploadPoll => DEFAULT_UPLOAD_VUS,
    }
}

/// Builds a plan for a scenario given on the command line.
///
/// # Errors
///
/// Returns an error when the default VU count is zero.
pub fn plan_from_cli(settings: ScenarioSettings, cli: &LoadArgs) -> AppResult<LoadPlan> {
    let kind = match &settings {
        ScenarioSettings::Upload(_) => ScenarioKind::Upload,
        ScenarioSettings::Translate(_) => ScenarioKind::Translate,
        ScenarioSettings::UploadPoll(_) => ScenarioKind::UploadPoll,
    };
    let vus = match cli.vus {
        Some(vus) => vus,
        None => PositiveUsize::try_from(default_vus(kind))?,
    };
    Ok(LoadPlan {
        settings,
        load: LoadOptions {
            vus,
            duration: cli.duration.unwrap_or(DEFAULT_DURATION),
            graceful_stop: cli.graceful_stop.unwrap_or(DEFAULT_GRACEFUL_STOP),
        },
        request_timeout: cli.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        max_check_failures_pct: cli.max_check_failures_pct,
        output_format: cli.output_format.unwrap_or_default(),
    })
}

/// Resolves a config file into a plan. CLI load flags win over file values.
///
/// # Errors
///
/// Returns an error when a value is invalid, a key does not apply to the
/// chosen scenario, or `files` and `samples_dir` are both set.
pub fn apply_config(config: &ConfigFile, cli: &LoadArgs) -> AppResult<LoadPlan> {
    let kind = config.scenario;
    let accepted = kind.accepted_fields();
    if let Some(field) = config
        .scenario_fields()
        .into_iter()
        .find(|field| !accepted.contains(field))
    {
        return Err(AppError::config(ConfigError::UnusedField {
            field,
            scenario: kind.as_str(),
        }));
    }

    let settings = match kind {
        ScenarioKind::Upload => ScenarioSettings::Upload(upload_settings(config)?),
        ScenarioKind::Translate => ScenarioSettings::Translate(TranslateSettings {
            url: config
                .url
                .clone()
                .unwrap_or_else(|| DEFAULT_TRANSLATE_URL.to_owned()),
            think_time: duration_field(
                config.think_time.as_ref(),
                "think_time",
                DEFAULT_THINK_TIME,
            )?,
        }),
        ScenarioKind::UploadPoll => ScenarioSettings::UploadPoll(upload_poll_settings(config)?),
    };

    let vus = match (cli.vus, config.vus) {
        (Some(vus), _) => vus,
        (None, Some(vus)) => PositiveUsize::try_from(vus)
            .map_err(|source| ConfigError::InvalidField { field: "vus", source })?,
        (None, None) => PositiveUsize::try_from(default_vus(kind))?,
    };
    let duration = match cli.duration {
        Some(duration) => duration,
        None => duration_field(config.duration.as_ref(), "duration", DEFAULT_DURATION)?,
    };
    let graceful_stop = match cli.graceful_stop {
        Some(graceful_stop) => graceful_stop,
        None => duration_field(
            config.graceful_stop.as_ref(),
            "graceful_stop",
            DEFAULT_GRACEFUL_STOP,
        )?,
    };
    let request_timeout = match cli.request_timeout {
        Some(timeout) => timeout,
        None => duration_field(config.timeout.as_ref(), "timeout", DEFAULT_REQUEST_TIMEOUT)?,
    };
    let max_check_failures_pct = match cli.max_check_failures_pct {
        Some(pct) => Some(pct),
        None => config.max_check_failures_pct.map(ensure_percent).transpose()?,
    };

    Ok(LoadPlan {
        settings,
        load: LoadOptions {
            vus,
            duration,
            graceful_stop,
        },
        request_timeout,
        max_check_failures_pct,
        output_format: cli
            .output_format
            .or(config.output_format)
            .unwrap_or_default(),
    })
}

fn upload_settings(config: &ConfigFile) -> Result<UploadSettings, ConfigError> {
    Ok(UploadSettings {
        url: config
            .url
            .clone()
            .unwrap_or_else(|| DEFAULT_UPLOAD_URL.to_owned()),
        file: config
            .file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_FILE)),
        field: field_name(config),
        form: form_fields(config.form.as_deref(), &[])?,
        expected_status: config.expected_status.unwrap_or(DEFAULT_EXPECTED_STATUS),
    })
}

fn upload_poll_settings(config: &ConfigFile) -> Result<UploadPollSettings, ConfigError> {
    let samples = match (&config.files, &config.samples_dir) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::Conflict {
                left: "files",
                right: "samples_dir",
            });
        }
        (Some(files), None) => SampleSource::Files(files.clone()),
        (None, Some(dir)) => SampleSource::WeightedDir(dir.clone()),
        (None, None) => SampleSource::WeightedDir(PathBuf::from(DEFAULT_SAMPLES_DIR)),
    };
    Ok(UploadPollSettings {
        base_url: config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        samples,
        field: field_name(config),
        form: form_fields(config.form.as_deref(), &[DEFAULT_POLL_FORM])?,
        poll_interval: duration_field(
            config.poll_interval.as_ref(),
            "poll_interval",
            DEFAULT_POLL_INTERVAL,
        )?,
        poll_timeout: duration_field(
            config.poll_timeout.as_ref(),
            "poll_timeout",
            DEFAULT_POLL_TIMEOUT,
        )?,
        wait_min: duration_field(config.wait_min.as_ref(), "wait_min", DEFAULT_WAIT_MIN)?,
        wait_max: duration_field(config.wait_max.as_ref(), "wait_max", DEFAULT_WAIT_MAX)?,
    })
}

fn field_name(config: &ConfigFile) -> String {
    config
        .field
        .clone()
        .unwrap_or_else(|| DEFAULT_FORM_FIELD.to_owned())
}

fn form_fields(
    entries: Option<&[String]>,
    defaults: &[&str],
) -> Result<Vec<FormField>, ConfigError> {
    let parse = |entry: &str| {
        parse_form_field(entry).map_err(|source| ConfigError::InvalidField {
            field: "form",
            source,
        })
    };
    match entries {
        Some(entries) => entries.iter().map(|entry| parse(entry.as_str())).collect(),
        None => defaults.iter().copied().map(parse).collect(),
    }
}

fn ensure_percent(value: u8) -> Result<u8, ConfigError> {
    if value > MAX_PERCENT {
        return Err(ConfigError::InvalidField {
            field: "max_check_failures_pct",
            source: ValidationError::ValueTooLarge {
                max: u64::from(MAX_PERCENT),
            },
        });
    }
    Ok(value)
}
