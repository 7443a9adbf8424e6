use futures_util::StreamExt;
use reqwest::RequestBuilder;
use tracing::debug;

/// Result of one HTTP exchange. `status` is `None` when no response arrived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOutcome {
    pub status: Option<u16>,
    pub timed_out: bool,
    pub transport_error: bool,
    pub response_bytes: u64,
}

impl RequestOutcome {
    #[must_use]
    pub const fn status_is(&self, expected: u16) -> bool {
        matches!(self.status, Some(status) if status == expected)
    }

    fn failed(err: &reqwest::Error) -> Self {
        let timed_out = err.is_timeout();
        Self {
            status: None,
            timed_out,
            transport_error: !timed_out,
            response_bytes: 0,
        }
    }
}

/// Sends the request and drains the body. Transport failures become part of the outcome.
pub async fn execute_request(request: RequestBuilder) -> RequestOutcome {
    match request.send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            match drain_response_body(response).await {
                Ok(bytes) => RequestOutcome {
                    status: Some(status),
                    timed_out: false,
                    transport_error: false,
                    response_bytes: bytes,
                },
                Err(err) => {
                    debug!("Failed to read response body: {}", err);
                    RequestOutcome::failed(&err)
                }
            }
        }
        Err(err) => {
            debug!("Request failed: {}", err);
            RequestOutcome::failed(&err)
        }
    }
}

/// Sends the request and decodes the body as JSON when it parses.
pub async fn execute_request_json(
    request: RequestBuilder,
) -> (RequestOutcome, Option<serde_json::Value>) {
    match request.send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.bytes().await {
                Ok(body) => {
                    let outcome = RequestOutcome {
                        status: Some(status),
                        timed_out: false,
                        transport_error: false,
                        response_bytes: u64::try_from(body.len()).unwrap_or(u64::MAX),
                    };
                    let json = serde_json::from_slice(&body).ok();
                    (outcome, json)
                }
                Err(err) => {
                    debug!("Failed to read response body: {}", err);
                    (RequestOutcome::failed(&err), None)
                }
            }
        }
        Err(err) => {
            debug!("Request failed: {}", err);
            (RequestOutcome::failed(&err), None)
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
