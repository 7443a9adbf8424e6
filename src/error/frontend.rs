use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("Failed to read frontend descriptor '{path}': {source}")]
    ReadDescriptor {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse frontend descriptor '{path}': {message}")]
    ParseDescriptor { path: PathBuf, message: String },
    #[error("Unsupported descriptor extension for '{path}'. Use .toml or .json.")]
    UnsupportedDescriptor { path: PathBuf },
    #[error("Failed to scan '{path}': {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Module list must not be empty.")]
    NoModules,
    #[error("Module '{name}' is listed more than once.")]
    DuplicateModule { name: String },
    #[error("Stylesheet entry {index} is empty.")]
    EmptyStylesheet { index: usize },
    #[error("Link {index} has an empty rel.")]
    EmptyLinkRel { index: usize },
    #[error("Link {index} href '{href}' is not a valid URL: {source}")]
    InvalidLinkHref {
        index: usize,
        href: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Link {index} href '{href}' must use http or https.")]
    UnsupportedLinkScheme { index: usize, href: String },
    #[error("Invalid compatibility date '{value}': {source}")]
    InvalidCompatibilityDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Theme '{name}' is listed more than once.")]
    DuplicateTheme { name: String },
    #[error("Theme names must not be empty.")]
    EmptyTheme,
    #[error("Font family list must not be empty when set.")]
    EmptyFontFamily,
    #[error("No descriptors given to unify.")]
    NothingToUnify,
    #[error(
        "Field '{field}' is defined differently in '{left}' and '{right}'. Pass --prefer to choose one explicitly."
    )]
    ConflictingDefinition {
        field: &'static str,
        left: PathBuf,
        right: PathBuf,
    },
    #[error("Preferred descriptor '{path}' is not among the inputs.")]
    PreferredNotInInputs { path: PathBuf },
}
