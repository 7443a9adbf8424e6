//! Core library for the `ocrbench` CLI.
//!
//! Drives virtual-user load against the OCR upload and translate endpoints,
//! records checks and per-request latency, and keeps the frontend build
//! configuration in a single validated descriptor. The primary interface is
//! the `ocrbench` command-line application.
pub mod args;
pub mod checks;
pub mod config;
pub mod entry;
pub mod error;
pub mod frontend;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod shutdown;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
