//! Client for the `saveString` endpoint.
//!
//! # Design
//! `SubmissionClient` holds its endpoint and a shared `Transport` and
//! nothing else. A submission is one linear pipeline:
//! validate → resolve endpoint → encode → send → classify. Each stage
//! short-circuits with a `SubmitError`, and no I/O happens until
//! `build_submit` has produced a complete request. `build_submit` and
//! `classify` are exposed separately so the request and the status
//! handling can be checked without a network.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::endpoint::{Endpoint, DEFAULT_ENDPOINT};
use crate::error::SubmitError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{SubmissionOutcome, SubmissionRequest};

/// Status the server answers with once the value is stored.
const SUCCESS_STATUS: u16 = 200;

/// Submits text values to one fixed endpoint.
///
/// Cloning is cheap and shares the underlying transport, so a single
/// instance can be handed to every caller that needs it.
pub struct SubmissionClient<T: ?Sized = UreqTransport> {
    endpoint: String,
    transport: Arc<T>,
}

impl<T: ?Sized> Clone for SubmissionClient<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl SubmissionClient<UreqTransport> {
    /// Create a client posting to `endpoint` over the default transport.
    ///
    /// The endpoint is checked on every submission rather than here, so a
    /// malformed value surfaces as `ErrorKind::InvalidEndpoint` through the
    /// normal result channel.
    pub fn new(endpoint: &str) -> Self {
        Self::with_transport(endpoint, UreqTransport::new())
    }
}

impl Default for SubmissionClient<UreqTransport> {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl<T: Transport> SubmissionClient<T> {
    pub fn with_transport(endpoint: &str, transport: T) -> Self {
        Self::with_shared_transport(endpoint, Arc::new(transport))
    }
}

impl<T: Transport + ?Sized> SubmissionClient<T> {
    /// Create a client over a transport that is already shared elsewhere.
    pub fn with_shared_transport(endpoint: &str, transport: Arc<T>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the POST request for `text`.
    ///
    /// Fails with `EmptyInput`, `InvalidEndpoint` or `EncodingFailure`, in
    /// that order of precedence.
    pub fn build_submit(&self, text: &str) -> Result<HttpRequest, SubmitError> {
        let submission = SubmissionRequest::new(text)?;
        let endpoint = Endpoint::parse(&self.endpoint)?;
        let body = serde_json::to_string(&submission.payload())
            .map_err(|e| SubmitError::encoding(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: endpoint.as_str().to_string(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        })
    }

    /// Map a received response to the submission outcome. Only the status
    /// code matters; the body is ignored.
    pub fn classify(&self, response: &HttpResponse) -> SubmissionOutcome {
        if response.status == SUCCESS_STATUS {
            return Ok(());
        }
        Err(SubmitError::unexpected_status())
    }

    /// Send `text` to the endpoint.
    ///
    /// Resolves once: `Ok(())` when the server answers 200, otherwise the
    /// `SubmitError` of the first stage that failed. Validation and encoding
    /// complete without awaiting; the only suspension is the network round
    /// trip. Dropping the returned future abandons the request.
    pub async fn submit(&self, text: &str) -> SubmissionOutcome {
        let request = self.build_submit(text).inspect_err(|e| {
            debug!(kind = e.kind().as_str(), "submission rejected before sending");
        })?;
        debug!(url = %request.url, len = text.len(), "submitting string");

        let response = self.transport.execute(request).await.map_err(|e| {
            warn!(error = %e, "transport failed");
            SubmitError::from(e)
        })?;

        self.classify(&response).inspect_err(|_| {
            warn!(status = response.status, "unexpected response status");
        })?;
        debug!("string submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn client() -> SubmissionClient {
        SubmissionClient::new("http://localhost:3000/saveString")
    }

    #[test]
    fn build_submit_produces_correct_request() {
        let req = client().build_submit("hello").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/saveString");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(body, serde_json::json!({ "myString": "hello" }));
    }

    #[test]
    fn build_submit_rejects_empty_text() {
        let err = client().build_submit("").unwrap_err();
        assert_eq!(err, SubmitError::empty_input());
    }

    #[test]
    fn empty_text_wins_over_invalid_endpoint() {
        let client = SubmissionClient::new("not a url");
        let err = client.build_submit("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
    }

    #[test]
    fn build_submit_rejects_invalid_endpoint() {
        let client = SubmissionClient::new("saveString");
        let err = client.build_submit("hello").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEndpoint);
    }

    #[test]
    fn default_client_targets_production_endpoint() {
        let req = SubmissionClient::default().build_submit("hello").unwrap();
        assert_eq!(req.url, DEFAULT_ENDPOINT);
    }

    #[test]
    fn classify_accepts_200() {
        assert!(client().classify(&HttpResponse::with_status(200)).is_ok());
    }

    #[test]
    fn classify_rejects_other_statuses() {
        for status in [201, 204, 301, 400, 404, 500, 503] {
            let err = client().classify(&HttpResponse::with_status(status)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnexpectedStatus, "status {status}");
            assert_eq!(err.message(), "Invalid response");
        }
    }

    #[test]
    fn classify_ignores_body() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json at all".to_string(),
        };
        assert!(client().classify(&response).is_ok());
    }

    #[test]
    fn clones_share_transport() {
        let a = client();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.transport, &b.transport));
        assert_eq!(b.endpoint(), "http://localhost:3000/saveString");
    }
}
