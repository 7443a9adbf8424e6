use thiserror::Error;

use super::{ConfigError, FrontendError, HttpError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("TOML error: {source}")]
    TomlSerialize {
        #[from]
        source: toml::ser::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Frontend configuration error: {0}")]
    Frontend(#[from] FrontendError),
    #[error("{failed} of {total} checks failed (limit {limit_pct}%).")]
    ChecksFailed {
        failed: u64,
        total: u64,
        limit_pct: u8,
    },
    #[error("Frontend hygiene check found {count} duplicate configuration group(s).")]
    DuplicateConfigs { count: usize },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    pub fn frontend<E>(error: E) -> Self
    where
        E: Into<FrontendError>,
    {
        error.into().into()
    }
}
