// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// C ABI entry points.
//
// Used by hosts that talk to the bridge through plain C: the iOS web view
// plugin (WKWebView message handler) and any other embedder. Both functions
// route into the forwarder registered with `crate::install`.
//
// ## Callback contract
//
// The callback receives the opaque `ctx` pointer given with the request and a
// NUL-terminated UTF-8 result that is only valid for the duration of the call.
// It fires at most once per request and may fire on any thread (deferred
// handlers resolve from wherever their work finishes); marshalling onto the
// main thread is the host's job. A null callback means "no callback".

use std::ffi::{CStr, CString, c_char, c_void};
use std::panic::{AssertUnwindSafe, catch_unwind};

use jsbridge_core::error::{BridgeError, Result};
use tracing::error;

use crate::forwarder::BridgeForwarder;
use crate::responder::Responder;
use crate::traits::ResponseCallback;

/// Result callback supplied by the C host.
pub type JsBridgeCallback = extern "C" fn(ctx: *mut c_void, result: *const c_char);

/// The request was accepted and handled.
pub const JSBRIDGE_OK: i32 = 0;
/// The payload pointer was null or not UTF-8.
pub const JSBRIDGE_INVALID_PAYLOAD: i32 = 1;
/// `install` has not been called.
pub const JSBRIDGE_NOT_INSTALLED: i32 = 2;
/// The request failed; the error policy decided whether the callback fired.
pub const JSBRIDGE_REQUEST_FAILED: i32 = 3;

/// Map an error onto the status codes returned across the boundary.
pub fn status_for(err: &BridgeError) -> i32 {
    match err {
        BridgeError::InvalidPayload => JSBRIDGE_INVALID_PAYLOAD,
        BridgeError::NotInstalled => JSBRIDGE_NOT_INSTALLED,
        _ => JSBRIDGE_REQUEST_FAILED,
    }
}

struct CCallback {
    ctx: *mut c_void,
    callback: JsBridgeCallback,
}

// SAFETY: the callback contract above requires `ctx` to be usable from any
// thread; the bridge never dereferences it.
unsafe impl Send for CCallback {}

impl ResponseCallback for CCallback {
    fn on_result(self: Box<Self>, result: String) {
        match CString::new(result) {
            Ok(result) => (self.callback)(self.ctx, result.as_ptr()),
            Err(e) => error!(error = %e, "result contains an interior NUL; not delivered"),
        }
    }
}

/// Send a JSON payload from JavaScript to native handlers.
///
/// # Safety
///
/// `payload` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jsbridge_receive_message(
    payload: *const c_char,
    ctx: *mut c_void,
    callback: Option<JsBridgeCallback>,
) -> i32 {
    // SAFETY: forwarded from this function's contract.
    let payload = match unsafe { read_payload(payload) } {
        Ok(payload) => payload,
        Err(err) => return status_for(&err),
    };
    let responder = callback.map(|callback| Responder::new(CCallback { ctx, callback }));

    receive_into(crate::installed().ok(), payload, responder)
}

/// Push a payload from native code to JavaScript through `callback`.
///
/// # Safety
///
/// Same requirements on `payload` as [`jsbridge_receive_message`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jsbridge_send_message(
    payload: *const c_char,
    ctx: *mut c_void,
    callback: Option<JsBridgeCallback>,
) -> i32 {
    // SAFETY: forwarded from this function's contract.
    let payload = match unsafe { read_payload(payload) } {
        Ok(payload) => payload,
        Err(err) => return status_for(&err),
    };
    let responder = callback.map(|callback| Responder::new(CCallback { ctx, callback }));

    send_into(crate::installed().ok(), payload, responder)
}

/// Shared body of the receive entry points (C and JNI), after the payload and
/// callback have been unpacked. `None` means nothing is installed yet; the
/// responder is then dropped unresolved.
pub(crate) fn receive_into(
    forwarder: Option<&BridgeForwarder>,
    payload: &str,
    responder: Option<Responder>,
) -> i32 {
    guarded(|| {
        forwarder
            .ok_or(BridgeError::NotInstalled)?
            .receive_message_from_js(payload, responder)
            .map(|_| ())
    })
}

/// Shared body of the send entry points.
pub(crate) fn send_into(
    forwarder: Option<&BridgeForwarder>,
    payload: &str,
    responder: Option<Responder>,
) -> i32 {
    guarded(|| {
        forwarder
            .ok_or(BridgeError::NotInstalled)?
            .send_message_to_js(payload, responder);
        Ok(())
    })
}

/// # Safety
///
/// `ptr` must be null or a valid NUL-terminated string outliving `'a`.
unsafe fn read_payload<'a>(ptr: *const c_char) -> Result<&'a str> {
    if ptr.is_null() {
        return Err(BridgeError::InvalidPayload);
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| BridgeError::InvalidPayload)
}

/// Run `f`, converting errors and panics into status codes.
fn guarded(f: impl FnOnce() -> Result<()>) -> i32 {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => JSBRIDGE_OK,
        Ok(Err(err)) => status_for(&err),
        Err(_) => {
            error!("panic reached a native entry point; contained");
            JSBRIDGE_REQUEST_FAILED
        }
    }
}
