//! Config-file driven runs: loading, parsing and resolution into a plan.
mod apply;
mod loader;
mod parse;
pub mod types;


pub use apply::{LoadPlan, apply_config, plan_from_cli};
pub use loader::{DEFAULT_CONFIG_FILES, load_config};

#[cfg(test)]
pub(crate) use loader::load_config_file;
