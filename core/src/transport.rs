//! Network execution behind the `Transport` seam.
//!
//! # Design
//! `SubmissionClient` never performs I/O itself; it hands a finished
//! `HttpRequest` to a `Transport` and classifies whatever comes back.
//! `UreqTransport` shares one `ureq::Agent` (and its connection pool)
//! across clones and runs each blocking call on tokio's blocking pool, so
//! concurrent submissions proceed independently without blocking the
//! caller's task.

use async_trait::async_trait;
use tracing::debug;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round trip.
///
/// Implementations must be safe to share between concurrent submissions,
/// resolve once per call, and apply no retries of their own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by a shared `ureq::Agent`.
///
/// Requests run on the blocking pool of the current tokio runtime; outside
/// one, `execute` fails with `TransportError::Connection`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Non-2xx statuses come back as responses so the client can
        // classify them.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| TransportError::Connection(format!("no async runtime: {e}")))?;
        let agent = self.agent.clone();
        handle
            .spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|join| {
                if join.is_cancelled() {
                    TransportError::Cancelled
                } else {
                    TransportError::Connection(format!("transport worker failed: {join}"))
                }
            })?
    }
}

fn execute_blocking(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    debug!(method = request.method.as_str(), url = %request.url, "executing request");

    let mut builder = match request.method {
        HttpMethod::Post => agent.post(&request.url),
    };
    for (key, value) in &request.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    let mut response = builder.send(request.body.as_bytes()).map_err(map_ureq_error)?;

    let status = response.status().as_u16();
    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .map(|(key, value)| {
            (
                key.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    debug!(status, headers = ?headers, "received response");
    // The body plays no part in classification; an unreadable one is
    // treated as empty.
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse { status, headers, body })
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Protocol(e) => TransportError::MalformedResponse(e.to_string()),
        other => TransportError::Connection(other.to_string()),
    }
}
