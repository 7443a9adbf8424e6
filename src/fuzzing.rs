use std::path::PathBuf;
use std::time::Duration;

use crate::args::{DescriptorFormat, FormField, LoadArgs, parse_duration_arg, parse_form_field};
use crate::config::types::ConfigFile;
use crate::config::{LoadPlan, apply_config};
use crate::error::{AppError, AppResult, ConfigError, FrontendError};
use crate::frontend::{FrontendConfig, FrontendDescriptor, render_config, unify, validate_config};

/// Parses a duration argument (e.g. `10s`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    Ok(parse_duration_arg(input)?)
}

/// Parses a multipart form field in `name=value` format.
///
/// # Errors
///
/// Returns an error when the entry is malformed.
pub fn parse_form_field_input(input: &str) -> AppResult<FormField> {
    Ok(parse_form_field(input)?)
}

/// Parses TOML config content and resolves it into a load plan.
///
/// # Errors
///
/// Returns an error when parsing or resolution fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<LoadPlan> {
    let config: ConfigFile = toml::from_str(input).map_err(|err| {
        AppError::config(ConfigError::ParseToml {
            path: PathBuf::from("fuzz.toml"),
            source: err,
        })
    })?;
    apply_config(&config, &LoadArgs::default())
}

/// Parses JSON config content and resolves it into a load plan.
///
/// # Errors
///
/// Returns an error when parsing or resolution fails.
pub fn apply_config_from_json(input: &str) -> AppResult<LoadPlan> {
    let config: ConfigFile = serde_json::from_str(input).map_err(|err| {
        AppError::config(ConfigError::ParseJson {
            path: PathBuf::from("fuzz.json"),
            source: err,
        })
    })?;
    apply_config(&config, &LoadArgs::default())
}

/// Parses a frontend descriptor, resolves defaults and validates it. A valid
/// config is rendered back to TOML.
///
/// # Errors
///
/// Returns an error when parsing, validation or rendering fails.
pub fn frontend_descriptor_input(input: &str) -> AppResult<String> {
    let descriptor = parse_frontend_descriptor(input)?;
    let config: FrontendConfig = descriptor.resolve();
    validate_config(&config)?;
    render_config(&config, DescriptorFormat::Toml)
}

/// Splits the input on a `---` line and unifies the halves as two variants.
///
/// # Errors
///
/// Returns an error when a half does not parse or the variants conflict.
pub fn unify_descriptors_input(input: &str) -> AppResult<FrontendConfig> {
    let (left, right) = input.split_once("\n---\n").unwrap_or((input, ""));
    let variants = vec![
        (PathBuf::from("left.toml"), parse_frontend_descriptor(left)?),
        (PathBuf::from("right.toml"), parse_frontend_descriptor(right)?),
    ];
    Ok(unify(&variants, None)?.resolve())
}

fn parse_frontend_descriptor(input: &str) -> Result<FrontendDescriptor, FrontendError> {
    toml::from_str(input).map_err(|err| FrontendError::ParseDescriptor {
        path: PathBuf::from("fuzz.toml"),
        message: err.to_string(),
    })
}
