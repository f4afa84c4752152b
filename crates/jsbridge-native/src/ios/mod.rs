// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS host.
//
// The WKWebView plugin calls the C ABI in `crate::ffi`
// (`jsbridge_receive_message` / `jsbridge_send_message`) and marshals the
// callback back onto the main queue itself, so nothing here touches UIKit.

#![cfg(target_os = "ios")]

use crate::traits::HostEnvironment;

/// Host handed to handlers on iOS.
#[derive(Debug, Clone, Copy, Default)]
pub struct IosHost;

impl HostEnvironment for IosHost {
    fn platform_name(&self) -> &str {
        "iOS"
    }
}
