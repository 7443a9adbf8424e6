use std::collections::BTreeSet;

use chrono::NaiveDate;
use url::Url;

use crate::error::FrontendError;

use super::types::FrontendConfig;

const COMPATIBILITY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks a resolved configuration before it is printed or handed to a build.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_config(config: &FrontendConfig) -> Result<(), FrontendError> {
    NaiveDate::parse_from_str(&config.compatibility_date, COMPATIBILITY_DATE_FORMAT).map_err(
        |err| FrontendError::InvalidCompatibilityDate {
            value: config.compatibility_date.clone(),
            source: err,
        },
    )?;

    if config.modules.is_empty() {
        return Err(FrontendError::NoModules);
    }
    if let Some(name) = first_duplicate(&config.modules) {
        return Err(FrontendError::DuplicateModule { name });
    }

    if let Some(index) = config.css.iter().position(|entry| entry.trim().is_empty()) {
        return Err(FrontendError::EmptyStylesheet { index });
    }

    for (index, link) in config.links.iter().enumerate() {
        if link.rel.trim().is_empty() {
            return Err(FrontendError::EmptyLinkRel { index });
        }
        let url = Url::parse(&link.href).map_err(|err| FrontendError::InvalidLinkHref {
            index,
            href: link.href.clone(),
            source: err,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FrontendError::UnsupportedLinkScheme {
                index,
                href: link.href.clone(),
            });
        }
    }

    let tailwind = &config.tailwind;
    if tailwind.themes.iter().any(|theme| theme.trim().is_empty()) {
        return Err(FrontendError::EmptyTheme);
    }
    if let Some(name) = first_duplicate(&tailwind.themes) {
        return Err(FrontendError::DuplicateTheme { name });
    }
    if let Some(font) = &tailwind.sans_font
        && (font.is_empty() || font.iter().any(|family| family.trim().is_empty()))
    {
        return Err(FrontendError::EmptyFontFamily);
    }

    Ok(())
}

fn first_duplicate(values: &[String]) -> Option<String> {
    let mut seen = BTreeSet::new();
    values
        .iter()
        .find(|value| !seen.insert(value.as_str()))
        .cloned()
}
