use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to join URL '{url}': {source}")]
    JoinUrlFailed {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL '{url}' cannot carry path segments.")]
    UrlCannotBeBase { url: String },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read sample file '{path}': {source}")]
    ReadSampleFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Sample path '{path}' has no file name.")]
    SampleFileNameMissing { path: PathBuf },
    #[error("Failed to read sample directory '{path}': {source}")]
    ReadSampleDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No weighted samples found in '{path}' (expected L-*, M-* or S-* images).")]
    NoWeightedSamples { path: PathBuf },
    #[error("Sample list was empty.")]
    SampleListEmpty,
    #[error("Invalid MIME type '{mime}': {source}")]
    InvalidMime {
        mime: String,
        #[source]
        source: reqwest::Error,
    },
}
