// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android glue via JNI.
//
// The Java side declares, in `org.hyperpolymath.jsbridge.NativeBridge`:
//
//     static native int receiveMessageFromJs(String payload, WVJBResponseCallback<String> callback);
//     static native int sendMessageToJs(String payload, WVJBResponseCallback<String> callback);
//
// and forwards the web view's bridge handler into them. The callback object is
// pinned with a global reference and its `onResult(Object)` is invoked once,
// from whichever thread resolves the request; that thread is attached to the
// JVM on demand. Posting back onto the UI thread is done by the Java callback.
//
// Status codes match the C ABI (`crate::ffi`).

#![cfg(target_os = "android")]

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::sys::jint;
use jni::{JNIEnv, JavaVM};

use jsbridge_core::error::{BridgeError, Result};
use tracing::error;

use crate::ffi::{JSBRIDGE_INVALID_PAYLOAD, receive_into, send_into, status_for};
use crate::responder::Responder;
use crate::traits::HostEnvironment;

/// JNI signature of `WVJBResponseCallback<String>.onResult` after erasure.
const ON_RESULT_SIG: &str = "(Ljava/lang/Object;)V";

/// Host handed to handlers on Android.
///
/// Zero-sized; the activity stays on the Java side and is never retained here.
#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidHost;

impl HostEnvironment for AndroidHost {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

/// Convenience: map any `jni::errors::Error` into `BridgeError::Platform`.
fn jni_err(context: &str, e: jni::errors::Error) -> BridgeError {
    BridgeError::Platform(format!("{context}: {e}"))
}

/// Wrap a Java callback object. A null object means "no callback".
fn java_responder(env: &mut JNIEnv<'_>, callback: &JObject<'_>) -> Result<Option<Responder>> {
    if callback.is_null() {
        return Ok(None);
    }
    let vm = env.get_java_vm().map_err(|e| jni_err("get JavaVM", e))?;
    let callback = env
        .new_global_ref(callback)
        .map_err(|e| jni_err("pin callback", e))?;

    Ok(Some(Responder::new(move |result: String| {
        if let Err(e) = deliver(&vm, &callback, &result) {
            error!(error = %e, "failed to deliver result to Java callback");
        }
    })))
}

fn deliver(vm: &JavaVM, callback: &GlobalRef, result: &str) -> Result<()> {
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| jni_err("attach thread", e))?;
    let result = env
        .new_string(result)
        .map_err(|e| jni_err("allocate result string", e))?;
    env.call_method(
        callback.as_obj(),
        "onResult",
        ON_RESULT_SIG,
        &[JValue::Object(&result)],
    )
    .map_err(|e| jni_err("call onResult", e))?;
    Ok(())
}

fn read_payload(env: &mut JNIEnv<'_>, payload: &JString<'_>) -> Option<String> {
    if payload.is_null() {
        return None;
    }
    match env.get_string(payload) {
        Ok(s) => Some(s.into()),
        Err(e) => {
            error!(error = %e, "failed to read payload string");
            None
        }
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_hyperpolymath_jsbridge_NativeBridge_receiveMessageFromJs<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    payload: JString<'local>,
    callback: JObject<'local>,
) -> jint {
    let Some(payload) = read_payload(&mut env, &payload) else {
        return JSBRIDGE_INVALID_PAYLOAD;
    };
    let responder = match java_responder(&mut env, &callback) {
        Ok(responder) => responder,
        Err(e) => {
            error!(error = %e, "could not wrap Java callback");
            return status_for(&e);
        }
    };

    receive_into(crate::installed().ok(), &payload, responder)
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_hyperpolymath_jsbridge_NativeBridge_sendMessageToJs<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    payload: JString<'local>,
    callback: JObject<'local>,
) -> jint {
    let Some(payload) = read_payload(&mut env, &payload) else {
        return JSBRIDGE_INVALID_PAYLOAD;
    };
    let responder = match java_responder(&mut env, &callback) {
        Ok(responder) => responder,
        Err(e) => {
            error!(error = %e, "could not wrap Java callback");
            return status_for(&e);
        }
    };

    send_into(crate::installed().ok(), &payload, responder)
}
