use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Value must be <= {max}.")]
    ValueTooLarge { max: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL '{url}' is missing host.")]
    UrlMissingHost { url: String },
    #[error("URL '{url}' must use http or https.")]
    UnsupportedScheme { url: String },
    #[error("Invalid form entry '{entry}'. Expected 'name=value'.")]
    InvalidFormEntryFormat { entry: String },
    #[error("Invalid form entry '{entry}'. Field name must not be empty.")]
    FormEntryNameEmpty { entry: String },
    #[error("wait-min must be <= wait-max.")]
    WaitRangeInverted,
    #[error("Cannot combine --file with --samples-dir.")]
    FileAndSamplesDirConflict,
    #[error("Failed to build runtime: {source}")]
    RuntimeBuildFailed {
        #[source]
        source: std::io::Error,
    },
}
