//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::{
    BenchArgs, CheckArgs, Command, FrontendArgs, FrontendCommand, LoadArgs, RunArgs, ShowArgs,
    TranslateArgs, UnifyArgs, UploadArgs, UploadPollArgs, ValidateArgs,
};
pub use defaults::{
    DEFAULT_BASE_URL, DEFAULT_DURATION, DEFAULT_EXPECTED_STATUS, DEFAULT_FORM_FIELD,
    DEFAULT_GRACEFUL_STOP, DEFAULT_POLL_FORM, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SAMPLE_FILE, DEFAULT_SAMPLES_DIR, DEFAULT_THINK_TIME,
    DEFAULT_TRANSLATE_URL, DEFAULT_TRANSLATE_VUS, DEFAULT_UPLOAD_URL, DEFAULT_UPLOAD_VUS,
    DEFAULT_USER_AGENT, DEFAULT_WAIT_MAX, DEFAULT_WAIT_MIN,
};
pub use types::{DescriptorFormat, FormField, OutputFormat, PositiveUsize, TailwindVariant};

pub(crate) use parsers::{parse_bool_env, parse_duration_arg, parse_form_field};
