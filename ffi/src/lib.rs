//! C-ABI wrapper around `savestring-core`.
//!
//! # Overview
//! Exposes string submission through `extern "C"` functions so native
//! hosts (mobile apps in particular) can submit values and receive the
//! outcome through a callback, without linking to Rust's async runtime
//! directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Each `FfiClient` owns a multi-thread tokio runtime; submissions run on
//!   it concurrently and never block the calling thread.
//! - An accepted submission invokes its callback exactly once, from a
//!   runtime worker (or from the calling thread when the text is rejected
//!   before any I/O). Freeing the client resolves pending submissions as
//!   cancelled.

mod completion;
pub mod types;

use std::ffi::{c_void, CStr};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use savestring_core::{SubmissionClient, SubmitError, DEFAULT_ENDPOINT};
use tracing::warn;

use completion::Completion;
use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client posting to `endpoint`, or to the built-in endpoint when
/// `endpoint` is null.
///
/// Returns null if `endpoint` is not valid UTF-8, if the runtime cannot be
/// started, or if an internal panic occurs. A syntactically invalid URL
/// still yields a client whose submissions fail with `InvalidEndpoint`.
/// The caller must free the returned pointer with `savestring_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn savestring_client_new(endpoint: *const c_char) -> *mut FfiClient {
    catch_unwind(|| {
        let endpoint = if endpoint.is_null() {
            DEFAULT_ENDPOINT
        } else {
            match unsafe { CStr::from_ptr(endpoint) }.to_str() {
                Ok(s) => s,
                Err(_) => return std::ptr::null_mut(),
            }
        };
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("savestring-worker")
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                warn!(error = %e, "failed to start runtime");
                return std::ptr::null_mut();
            }
        };
        let client = FfiClient {
            inner: SubmissionClient::new(endpoint),
            runtime,
        };
        Box::into_raw(Box::new(client))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `savestring_client_new`. Safe to call with null.
///
/// Does not wait for in-flight submissions; each of them still resolves
/// its callback once, as a cancelled transport failure.
#[unsafe(no_mangle)]
pub extern "C" fn savestring_client_free(client: *mut FfiClient) {
    if client.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let client = unsafe { Box::from_raw(client) };
        let FfiClient { inner, runtime } = *client;
        drop(inner);
        runtime.shutdown_background();
    }));
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Submit `text` to the client's endpoint.
///
/// When this returns `Accepted`, `callback` is invoked exactly once with
/// the outcome and `user_data`; for any other status it is never invoked.
/// `text` is copied before returning. Text that is not valid UTF-8 resolves
/// immediately as `EncodingFailure`.
#[unsafe(no_mangle)]
pub extern "C" fn savestring_submit(
    client: *const FfiClient,
    text: *const c_char,
    callback: Option<SubmitCallback>,
    user_data: *mut c_void,
) -> FfiSubmitStatus {
    if client.is_null() {
        return FfiSubmitStatus::NullClient;
    }
    if text.is_null() {
        return FfiSubmitStatus::NullText;
    }
    let Some(callback) = callback else {
        return FfiSubmitStatus::NullCallback;
    };

    catch_unwind(AssertUnwindSafe(|| {
        let client = unsafe { &*client };

        let text = match unsafe { CStr::from_ptr(text) }.to_str() {
            Ok(s) => s.to_string(),
            Err(e) => {
                let outcome = Err(SubmitError::encoding(e.to_string()));
                Completion::new(callback, UserData(user_data)).deliver(outcome);
                return FfiSubmitStatus::Accepted;
            }
        };

        let inner = client.inner.clone();
        let completion = Completion::new(callback, UserData(user_data));
        client.runtime.spawn(async move {
            let outcome = inner.submit(&text).await;
            completion.deliver(outcome);
        });
        FfiSubmitStatus::Accepted
    }))
    .unwrap_or(FfiSubmitStatus::Panicked)
}
