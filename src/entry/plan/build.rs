use std::path::PathBuf;

use tracing::error;

use crate::args::{Command, DEFAULT_SAMPLES_DIR, UploadPollArgs};
use crate::config::{apply_config, load_config, plan_from_cli};
use crate::error::{AppError, AppResult, ValidationError};
use crate::scenario::{
    SampleSource, ScenarioSettings, TranslateSettings, UploadPollSettings, UploadSettings,
};

use super::types::RunPlan;

pub(crate) fn build_plan(command: Command) -> AppResult<RunPlan> {
    let plan = match command {
        Command::Upload(args) => {
            let settings = ScenarioSettings::Upload(UploadSettings {
                url: args.url,
                file: args.file,
                field: args.field,
                form: args.form,
                expected_status: args.expected_status,
            });
            plan_from_cli(settings, &args.load)?
        }
        Command::Translate(args) => {
            let settings = ScenarioSettings::Translate(TranslateSettings {
                url: args.url,
                think_time: args.think_time,
            });
            plan_from_cli(settings, &args.load)?
        }
        Command::UploadPoll(args) => {
            let load = args.load.clone();
            let settings = ScenarioSettings::UploadPoll(upload_poll_settings(args)?);
            plan_from_cli(settings, &load)?
        }
        Command::Run(args) => {
            let config = load_config(args.config.as_deref())?;
            apply_config(&config, &args.load)?
        }
        Command::Frontend(args) => return Ok(RunPlan::Frontend(args.command)),
    };
    Ok(RunPlan::Load(Box::new(plan)))
}

fn upload_poll_settings(args: UploadPollArgs) -> AppResult<UploadPollSettings> {
    let samples = match (args.files.is_empty(), args.samples_dir) {
        (false, Some(_)) => {
            error!("--file and --samples-dir are mutually exclusive.");
            return Err(AppError::validation(
                ValidationError::FileAndSamplesDirConflict,
            ));
        }
        (false, None) => SampleSource::Files(args.files),
        (true, Some(dir)) => SampleSource::WeightedDir(dir),
        (true, None) => SampleSource::WeightedDir(PathBuf::from(DEFAULT_SAMPLES_DIR)),
    };
    Ok(UploadPollSettings {
        base_url: args.base_url,
        samples,
        field: args.field,
        form: args.form,
        poll_interval: args.poll_interval,
        poll_timeout: args.poll_timeout,
        wait_min: args.wait_min,
        wait_max: args.wait_max,
    })
}
