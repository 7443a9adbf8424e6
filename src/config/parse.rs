use std::time::Duration;

use crate::args::parse_duration_arg;
use crate::error::{ConfigError, ValidationError};

use super::types::DurationValue;

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}

/// Resolves an optional duration field, tagging errors with the field name.
pub(super) fn duration_field(
    value: Option<&DurationValue>,
    field: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    value.map_or(Ok(default), |value| {
        value
            .to_duration()
            .map_err(|source| ConfigError::InvalidField { field, source })
    })
}
