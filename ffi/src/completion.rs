//! Exactly-once delivery of a submission outcome to a host callback.

use savestring_core::{SubmissionOutcome, SubmitError, TransportError};

use crate::types::{invoke, SubmitCallback, UserData};

/// Owns a host callback until it has been invoked.
///
/// `deliver` consumes the completion, so a second delivery cannot be
/// expressed. If the completion is dropped undelivered (the task holding it
/// was cancelled because the client was freed), the callback receives a
/// cancelled transport failure instead.
pub(crate) struct Completion {
    callback: SubmitCallback,
    user_data: UserData,
    delivered: bool,
}

impl Completion {
    pub(crate) fn new(callback: SubmitCallback, user_data: UserData) -> Self {
        Self {
            callback,
            user_data,
            delivered: false,
        }
    }

    pub(crate) fn deliver(mut self, outcome: SubmissionOutcome) {
        self.delivered = true;
        invoke(self.callback, &self.user_data, &outcome);
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if !self.delivered {
            tracing::debug!("submission dropped before completion");
            let outcome = Err(SubmitError::from(TransportError::Cancelled));
            invoke(self.callback, &self.user_data, &outcome);
        }
    }
}
