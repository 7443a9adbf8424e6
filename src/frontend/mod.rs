//! Frontend build configuration: typed descriptor, validation, variant
//! unification and a duplicate-config hygiene scan.
mod hygiene;
mod loader;
mod types;
mod unify;
mod validate;

#[cfg(test)]
mod tests;

pub use hygiene::{DuplicateGroup, HygieneReport, scan_duplicates};
pub use loader::{load_descriptor, render_config};
pub use types::{
    ColorMode, ColorModeDescriptor, ColorPreference, FrontendConfig, FrontendDescriptor, HeadLink,
    TailwindConfig, TailwindDescriptor,
};
pub use unify::unify;
pub use validate::validate_config;
