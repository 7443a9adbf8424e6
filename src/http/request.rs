use reqwest::multipart::{Form, Part};
use url::Url;

use crate::args::FormField;
use crate::error::{AppError, AppResult, HttpError, ValidationError};

use super::samples::SampleFile;

/// Parses a target URL and requires an http(s) scheme with a host.
///
/// # Errors
///
/// Returns an error when the URL is malformed, has no host, or uses another scheme.
pub fn validate_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::validation(ValidationError::UnsupportedScheme {
            url: raw.to_owned(),
        }));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(ValidationError::UrlMissingHost {
            url: raw.to_owned(),
        }));
    }
    Ok(url)
}

/// Resolves `path` against `base`, keeping any path prefix the base carries.
///
/// # Errors
///
/// Returns an error when the joined URL is invalid.
pub fn join_url(base: &Url, path: &str) -> AppResult<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/')).map_err(|err| {
        AppError::http(HttpError::JoinUrlFailed {
            url: format!("{}{}", base, path),
            source: err,
        })
    })
}

/// Appends each segment to `base`'s path, percent-encoding it so that `/`,
/// `?` and `#` stay inside the segment.
///
/// # Errors
///
/// Returns an error when `base` cannot carry a path.
pub fn push_path_segments(base: &Url, segments: &[&str]) -> AppResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            AppError::http(HttpError::UrlCannotBeBase {
                url: base.to_string(),
            })
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Builds the multipart body for one upload: the text fields first, then the file part.
///
/// # Errors
///
/// Returns an error when the sample's MIME type is rejected.
pub fn build_multipart(
    file_field: &str,
    fields: &[FormField],
    sample: &SampleFile,
) -> AppResult<Form> {
    let mut form = Form::new();
    for field in fields {
        form = form.text(field.name.clone(), field.value.clone());
    }
    let part = Part::bytes(sample.bytes.to_vec())
        .file_name(sample.file_name.clone())
        .mime_str(sample.mime)
        .map_err(|err| {
            AppError::http(HttpError::InvalidMime {
                mime: sample.mime.to_owned(),
                source: err,
            })
        })?;
    Ok(form.part(file_field.to_owned(), part))
}
