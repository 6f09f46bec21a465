//! Asynchronous client core for the `saveString` service.
//!
//! # Overview
//! `SubmissionClient` sends a single text value to a fixed endpoint as
//! `{"myString": "<text>"}` and resolves with `Ok(())` on HTTP 200 or a
//! typed `SubmitError` otherwise.
//!
//! # Design
//! - Request building (`build_submit`) and response classification
//!   (`classify`) are pure and touch no network.
//! - The round trip goes through the `Transport` trait; `UreqTransport` is
//!   the shared default, tests inject stubs.
//! - Every failure is a `SubmitError` with a closed `ErrorKind`; nothing
//!   panics or escapes `submit` any other way.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::SubmissionClient;
pub use endpoint::{Endpoint, DEFAULT_ENDPOINT};
pub use error::{ErrorKind, SubmitError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{SavePayload, SubmissionOutcome, SubmissionRequest};
