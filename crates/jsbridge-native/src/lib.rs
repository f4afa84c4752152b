// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! jsbridge — native side of the web view message bridge.
//!
//! JavaScript sends a JSON object with a `msg` command identifier; the
//! [`BridgeForwarder`] parses it, the [`TaskDispatcher`] routes it through the
//! [`CommandRegistry`], and the handler's response is delivered through a
//! single-shot [`Responder`]. Native code pushes payloads the other way with
//! [`BridgeForwarder::send_message_to_js`].
//!
//! Platform glue (`ffi` for C hosts such as iOS, `android` for JNI) routes
//! into the forwarder registered with [`install`].

use std::sync::{Arc, OnceLock};

use jsbridge_core::error::{BridgeError, Result};

pub mod builtins;
pub mod dispatcher;
pub mod ffi;
pub mod forwarder;
pub mod registry;
pub mod responder;
pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

pub use dispatcher::{DispatchContext, Reply, TaskDispatcher};
pub use forwarder::BridgeForwarder;
pub use registry::{CommandRegistry, Handler, RegistryBuilder};
pub use responder::Responder;
pub use traits::{HostEnvironment, ResponseCallback};

/// The forwarder used by the native entry points.
static INSTALLED: OnceLock<BridgeForwarder> = OnceLock::new();

/// Returns the host implementation for the target operating system.
pub fn platform_host() -> Arc<dyn HostEnvironment> {
    #[cfg(target_os = "ios")]
    {
        Arc::new(ios::IosHost)
    }
    #[cfg(target_os = "android")]
    {
        Arc::new(android::AndroidHost)
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Arc::new(stub::StubHost)
    }
}

/// Make `forwarder` the process-wide target of the native entry points.
///
/// Call once at startup, after the command table is built.
pub fn install(forwarder: BridgeForwarder) -> Result<()> {
    INSTALLED
        .set(forwarder)
        .map_err(|_| BridgeError::AlreadyInstalled)
}

/// The forwarder registered with [`install`].
pub fn installed() -> Result<&'static BridgeForwarder> {
    INSTALLED.get().ok_or(BridgeError::NotInstalled)
}
