use std::path::Path;

use crate::args::DescriptorFormat;
use crate::error::{AppResult, FrontendError};

use super::types::{FrontendConfig, FrontendDescriptor};

/// Reads a `.toml` or `.json` descriptor without filling defaults.
///
/// # Errors
///
/// Returns an error when the file cannot be read, parsed, or has another extension.
pub fn load_descriptor(path: &Path) -> Result<FrontendDescriptor, FrontendError> {
    let format = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => DescriptorFormat::Toml,
        Some("json") => DescriptorFormat::Json,
        _ => {
            return Err(FrontendError::UnsupportedDescriptor {
                path: path.to_path_buf(),
            });
        }
    };
    let content = std::fs::read_to_string(path).map_err(|err| FrontendError::ReadDescriptor {
        path: path.to_path_buf(),
        source: err,
    })?;
    parse_descriptor(&content, format).map_err(|message| FrontendError::ParseDescriptor {
        path: path.to_path_buf(),
        message,
    })
}

pub(super) fn parse_descriptor(
    content: &str,
    format: DescriptorFormat,
) -> Result<FrontendDescriptor, String> {
    match format {
        DescriptorFormat::Toml => toml::from_str(content).map_err(|err| err.to_string()),
        DescriptorFormat::Json => serde_json::from_str(content).map_err(|err| err.to_string()),
    }
}

/// Serializes a resolved configuration.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_config(config: &FrontendConfig, format: DescriptorFormat) -> AppResult<String> {
    match format {
        DescriptorFormat::Toml => Ok(toml::to_string_pretty(config)?),
        DescriptorFormat::Json => Ok(serde_json::to_string_pretty(config)?),
    }
}
