use std::time::Duration;

use reqwest::Client;
use tracing::error;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

/// Timeout for establishing a new connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub struct ClientOptions {
    pub request_timeout: Duration,
}

/// Builds the HTTP client shared by every virtual user.
///
/// # Errors
///
/// Returns an error when the client cannot be constructed.
pub fn build_client(options: ClientOptions) -> AppResult<Client> {
    Client::builder()
        .timeout(options.request_timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(options.request_timeout))
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| {
            error!("Failed to build HTTP client: {}", err);
            AppError::http(HttpError::BuildClientFailed { source: err })
        })
}
