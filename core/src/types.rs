//! Submission values and the wire payload.

use serde::Serialize;

use crate::error::SubmitError;

/// Result of one submission: `Ok(())` means the server acknowledged the
/// value with HTTP 200.
pub type SubmissionOutcome = Result<(), SubmitError>;

/// A validated, non-empty text value ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    text: String,
}

impl SubmissionRequest {
    pub fn new(text: impl Into<String>) -> Result<Self, SubmitError> {
        let text = text.into();
        if text.is_empty() {
            return Err(SubmitError::empty_input());
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn payload(&self) -> SavePayload<'_> {
        SavePayload {
            my_string: &self.text,
        }
    }
}

/// JSON body of a `saveString` call. Serializes to exactly
/// `{"myString": "<text>"}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SavePayload<'a> {
    #[serde(rename = "myString")]
    pub my_string: &'a str,
}
