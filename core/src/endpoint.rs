//! The fixed URL a client posts to.

use std::fmt;

use ureq::http::Uri;

use crate::error::SubmitError;

/// Production `saveString` endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://us-central1-mobilesdklogging.cloudfunctions.net/saveString";

/// A validated absolute http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    /// Validate `raw` without performing any I/O.
    pub fn parse(raw: &str) -> Result<Self, SubmitError> {
        let uri: Uri = raw.parse().map_err(SubmitError::invalid_endpoint)?;
        match uri.scheme_str() {
            Some("http") | Some("https") => {}
            Some(other) => {
                return Err(SubmitError::invalid_endpoint(format!(
                    "unsupported scheme `{other}`"
                )))
            }
            None => return Err(SubmitError::invalid_endpoint("missing scheme")),
        }
        if uri.host().map_or(true, str::is_empty) {
            return Err(SubmitError::invalid_endpoint("missing host"));
        }
        Ok(Self {
            url: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
