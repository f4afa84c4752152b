// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub host for desktop/CI builds where no web view is embedded.

use crate::traits::HostEnvironment;

/// Host used on non-mobile platforms and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubHost;

impl HostEnvironment for StubHost {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}
