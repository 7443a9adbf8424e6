//! HTTP client setup, request building and sample payloads.
mod client;
mod execution;
mod request;
mod samples;


pub use client::{ClientOptions, build_client};
pub use execution::{RequestOutcome, execute_request, execute_request_json};
pub use request::{build_multipart, join_url, push_path_segments, validate_url};
pub use samples::{SampleFile, SamplePool, WEIGHTED_GROUPS};
