use std::time::Duration;

use super::types::{FormField, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};

/// Highest accepted value for percentage flags.
const MAX_PERCENT: u8 = 100;

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(super) fn parse_percent(s: &str) -> AppResult<u8> {
    let value: u8 = s
        .trim()
        .parse()
        .map_err(|err| AppError::validation(ValidationError::InvalidNumber { source: err }))?;
    if value > MAX_PERCENT {
        return Err(AppError::validation(ValidationError::ValueTooLarge {
            max: u64::from(MAX_PERCENT),
        }));
    }
    Ok(value)
}

pub(crate) fn parse_bool_env(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_form_field(s: &str) -> Result<FormField, ValidationError> {
    let Some((name, value)) = s.split_once('=') else {
        return Err(ValidationError::InvalidFormEntryFormat {
            entry: s.to_owned(),
        });
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::FormEntryNameEmpty {
            entry: s.to_owned(),
        });
    }
    Ok(FormField {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

/// Parses `500ms`, `10s`, `2m`, `1h`; a bare number means seconds.
pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}
