//! Error taxonomy for string submission.
//!
//! # Design
//! `ErrorKind` is a closed set; each kind has a stable numeric code and a
//! fixed message template. `SubmitError` pairs the kind with its rendered
//! message, which is what callers surface to users. `TransportError` is the
//! narrower vocabulary a `Transport` reports in, folded into `SubmitError`
//! by the client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message for rejected empty input.
pub const EMPTY_INPUT_MESSAGE: &str = "String cannot be empty.";

/// Message for any response other than HTTP 200.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response";

/// Message for a submission abandoned before the transport answered.
pub const CANCELLED_MESSAGE: &str = "cancelled";

/// The closed set of ways a submission can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The input text was empty; rejected before any I/O.
    EmptyInput,
    /// The configured endpoint is not an absolute http(s) URL.
    InvalidEndpoint,
    /// The payload could not be serialized to JSON.
    EncodingFailure,
    /// DNS, connection, timeout or cancellation error.
    TransportFailure,
    /// The server answered with a status other than 200.
    UnexpectedStatus,
}

impl ErrorKind {
    /// Stable identifying code, shared with the FFI surface.
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::InvalidEndpoint => -1,
            ErrorKind::UnexpectedStatus => -2,
            ErrorKind::EmptyInput => -3,
            ErrorKind::EncodingFailure => -4,
            ErrorKind::TransportFailure => -5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::InvalidEndpoint => "invalid_endpoint",
            ErrorKind::EncodingFailure => "encoding_failure",
            ErrorKind::TransportFailure => "transport_failure",
            ErrorKind::UnexpectedStatus => "unexpected_status",
        }
    }

    /// Whether the caller can act on the failure (re-prompt or retry)
    /// rather than it indicating a configuration or encoding bug.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            ErrorKind::EmptyInput | ErrorKind::TransportFailure | ErrorKind::UnexpectedStatus
        )
    }
}

/// A failed submission: the kind plus its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmitError {
    kind: ErrorKind,
    message: String,
}

impl SubmitError {
    pub fn empty_input() -> Self {
        Self::new(ErrorKind::EmptyInput, EMPTY_INPUT_MESSAGE)
    }

    pub fn invalid_endpoint(detail: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::InvalidEndpoint, format!("Invalid URL: {detail}"))
    }

    pub fn encoding(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::EncodingFailure, detail)
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportFailure, detail)
    }

    pub fn unexpected_status() -> Self {
        Self::new(ErrorKind::UnexpectedStatus, INVALID_RESPONSE_MESSAGE)
    }

    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported by a `Transport` when no usable HTTP status came back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request was abandoned before it completed.
    #[error("cancelled")]
    Cancelled,

    /// DNS, connect, TLS, I/O or timeout failure.
    #[error("{0}")]
    Connection(String),

    /// Bytes came back but did not form a recognizable HTTP response.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<TransportError> for SubmitError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled => SubmitError::transport(CANCELLED_MESSAGE),
            TransportError::Connection(msg) => SubmitError::transport(msg),
            TransportError::MalformedResponse(_) => SubmitError::unexpected_status(),
        }
    }
}
