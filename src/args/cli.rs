use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{
    DEFAULT_BASE_URL, DEFAULT_FORM_FIELD, DEFAULT_POLL_FORM, DEFAULT_SAMPLE_FILE,
    DEFAULT_TRANSLATE_URL, DEFAULT_UPLOAD_URL,
};
use super::parsers::{parse_duration_arg, parse_form_field, parse_percent, parse_positive_usize};
use super::types::{DescriptorFormat, FormField, OutputFormat, PositiveUsize, TailwindVariant};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Load-testing harness for the OCR/translate service, with a hygiene checker for its frontend build configuration."
)]
pub struct BenchArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (sets log level to debug unless overridden by OCRBENCH_LOG/RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable ANSI colors in log output (also honors NO_COLOR)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// POST a fixed sample file as multipart form-data and check the status
    Upload(UploadArgs),
    /// GET the translate endpoint with a pause after every request
    Translate(TranslateArgs),
    /// Upload a weighted sample, then poll the job status until it completes
    #[command(name = "upload-poll")]
    UploadPoll(UploadPollArgs),
    /// Run a scenario described by a TOML/JSON config file
    Run(RunArgs),
    /// Frontend build configuration tools
    Frontend(FrontendArgs),
}

/// Load options shared by every scenario. Unset values fall back to the
/// scenario's defaults (or to the config file for `run`).
#[derive(Debug, Args, Clone, Default)]
pub struct LoadArgs {
    /// Number of concurrent virtual users
    #[arg(long = "vus", env = "OCRBENCH_VUS", value_parser = parse_positive_usize)]
    pub vus: Option<PositiveUsize>,

    /// Wall-clock duration of the run (supports ms/s/m/h)
    #[arg(long = "duration", short = 'd', env = "OCRBENCH_DURATION", value_parser = parse_duration_arg)]
    pub duration: Option<Duration>,

    /// Time in-flight iterations may keep running after the duration ends
    #[arg(long = "graceful-stop", value_parser = parse_duration_arg)]
    pub graceful_stop: Option<Duration>,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Fail the run when more than this percentage of checks fail
    #[arg(long = "max-check-failures-pct", value_parser = parse_percent)]
    pub max_check_failures_pct: Option<u8>,

    /// Summary output format
    #[arg(long = "output-format", ignore_case = true)]
    pub output_format: Option<OutputFormat>,
}

#[derive(Debug, Args, Clone)]
pub struct UploadArgs {
    /// Upload endpoint
    #[arg(long, short, default_value = DEFAULT_UPLOAD_URL)]
    pub url: String,

    /// Sample file sent on every iteration
    #[arg(long, short, default_value = DEFAULT_SAMPLE_FILE)]
    pub file: PathBuf,

    /// Multipart field name carrying the file
    #[arg(long = "field", default_value = DEFAULT_FORM_FIELD)]
    pub field: String,

    /// Extra multipart text fields in 'name=value' format (repeatable)
    #[arg(long = "form", value_parser = parse_form_field)]
    pub form: Vec<FormField>,

    /// Status code the check expects
    #[arg(long = "expected-status", short = 's', default_value = "200")]
    pub expected_status: u16,

    #[command(flatten)]
    pub load: LoadArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TranslateArgs {
    /// Translate endpoint
    #[arg(long, short, default_value = DEFAULT_TRANSLATE_URL)]
    pub url: String,

    /// Pause after every request (supports ms/s/m/h)
    #[arg(long = "think-time", default_value = "1s", value_parser = parse_duration_arg)]
    pub think_time: Duration,

    #[command(flatten)]
    pub load: LoadArgs,
}

#[derive(Debug, Args, Clone)]
pub struct UploadPollArgs {
    /// Service base URL; /upload and /status/{jobID} are resolved against it
    #[arg(long = "base-url", short = 'b', default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Explicit sample files, chosen uniformly (repeatable)
    #[arg(long = "file", short = 'f')]
    pub files: Vec<PathBuf>,

    /// Directory of L-*/M-*/S-* images chosen with 30/50/20 weights
    #[arg(long = "samples-dir")]
    pub samples_dir: Option<PathBuf>,

    /// Multipart field name carrying the file
    #[arg(long = "field", default_value = DEFAULT_FORM_FIELD)]
    pub field: String,

    /// Extra multipart text fields in 'name=value' format (repeatable)
    #[arg(long = "form", value_parser = parse_form_field, default_value = DEFAULT_POLL_FORM)]
    pub form: Vec<FormField>,

    /// Delay between status polls
    #[arg(long = "poll-interval", default_value = "1s", value_parser = parse_duration_arg)]
    pub poll_interval: Duration,

    /// Give up polling a job after this long
    #[arg(long = "poll-timeout", default_value = "5m", value_parser = parse_duration_arg)]
    pub poll_timeout: Duration,

    /// Lower bound of the random wait between iterations
    #[arg(long = "wait-min", default_value = "1s", value_parser = parse_duration_arg)]
    pub wait_min: Duration,

    /// Upper bound of the random wait between iterations
    #[arg(long = "wait-max", default_value = "5s", value_parser = parse_duration_arg)]
    pub wait_max: Duration,

    #[command(flatten)]
    pub load: LoadArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Path to config file (TOML/JSON). Defaults to ./ocrbench.toml or ./ocrbench.json.
    #[arg(long, short = 'c', env = "OCRBENCH_CONFIG")]
    pub config: Option<String>,

    #[command(flatten)]
    pub load: LoadArgs,
}

#[derive(Debug, Args, Clone)]
pub struct FrontendArgs {
    #[command(subcommand)]
    pub command: FrontendCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum FrontendCommand {
    /// Report configuration files defined more than once under a directory
    Check(CheckArgs),
    /// Load and validate a frontend descriptor
    Validate(ValidateArgs),
    /// Merge descriptor variants into one explicit configuration
    Unify(UnifyArgs),
    /// Print the built-in frontend configuration
    Show(ShowArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Report format
    #[arg(long = "output-format", default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Args, Clone)]
pub struct ValidateArgs {
    /// Descriptor file (.toml or .json)
    pub path: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct UnifyArgs {
    /// Descriptor variants (.toml or .json)
    #[arg(required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Variant whose values win on conflicting fields
    #[arg(long)]
    pub prefer: Option<PathBuf>,

    /// Output format of the unified descriptor
    #[arg(long, default_value = "toml", ignore_case = true)]
    pub format: DescriptorFormat,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Output format
    #[arg(long, default_value = "toml", ignore_case = true)]
    pub format: DescriptorFormat,

    /// Fill the tailwind section from a built-in variant
    #[arg(long, ignore_case = true)]
    pub tailwind: Option<TailwindVariant>,
}
