//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with a C-compatible representation:
//! `*const c_char` instead of `String` and explicit enum discriminants.
//! Results are only lent to the host for the duration of a callback, so
//! nothing here needs a matching free function.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use savestring_core::{ErrorKind, SubmissionOutcome};

/// Opaque handle to a submission client and the runtime that drives it.
pub struct FfiClient {
    pub(crate) inner: savestring_core::SubmissionClient,
    pub(crate) runtime: tokio::runtime::Runtime,
}

/// Outcome of `savestring_submit` itself. Only `Accepted` guarantees the
/// callback will run.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiSubmitStatus {
    Accepted = 0,
    NullClient = 1,
    NullText = 2,
    NullCallback = 3,
    Panicked = 4,
}

/// Failure kind as a C enum. `None` accompanies a successful result.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorKind {
    None = 0,
    EmptyInput = 1,
    InvalidEndpoint = 2,
    EncodingFailure = 3,
    TransportFailure = 4,
    UnexpectedStatus = 5,
}

impl From<ErrorKind> for FfiErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::EmptyInput => FfiErrorKind::EmptyInput,
            ErrorKind::InvalidEndpoint => FfiErrorKind::InvalidEndpoint,
            ErrorKind::EncodingFailure => FfiErrorKind::EncodingFailure,
            ErrorKind::TransportFailure => FfiErrorKind::TransportFailure,
            ErrorKind::UnexpectedStatus => FfiErrorKind::UnexpectedStatus,
        }
    }
}

/// Result handed to the host callback.
///
/// `message` is null on success. The pointer is only valid until the
/// callback returns; hosts must copy it to keep it.
#[repr(C)]
pub struct FfiSubmitResult {
    pub success: bool,
    pub kind: FfiErrorKind,
    pub code: i32,
    pub message: *const c_char,
}

/// Host callback invoked once per accepted submission.
pub type SubmitCallback = extern "C" fn(user_data: *mut c_void, result: *const FfiSubmitResult);

/// Host context pointer carried to the worker that completes the call.
pub(crate) struct UserData(pub(crate) *mut c_void);

// The host owns `user_data` and promises it may be used from any thread
// until the callback has run.
unsafe impl Send for UserData {}

/// Invoke `callback` with `outcome`, keeping the message alive for the call.
pub(crate) fn invoke(callback: SubmitCallback, user_data: &UserData, outcome: &SubmissionOutcome) {
    match outcome {
        Ok(()) => {
            let result = FfiSubmitResult {
                success: true,
                kind: FfiErrorKind::None,
                code: 0,
                message: std::ptr::null(),
            };
            callback(user_data.0, &result);
        }
        Err(err) => {
            let message = CString::new(err.message().replace('\0', "")).unwrap_or_default();
            let result = FfiSubmitResult {
                success: false,
                kind: err.kind().into(),
                code: err.code(),
                message: message.as_ptr(),
            };
            callback(user_data.0, &result);
        }
    }
}
