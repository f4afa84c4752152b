// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wires configuration, the command table and the forwarder together for the
// console host.

use std::path::Path;

use jsbridge_core::config::CONFIG_FILE;
use jsbridge_core::{BridgeConfig, ErrorPolicy};
use jsbridge_native::{BridgeForwarder, CommandRegistry};
use tracing::{info, warn};

use super::commands::{self, PendingTasks};

/// Environment variable overriding the configured error policy.
pub const POLICY_ENV: &str = "JSBRIDGE_ERROR_POLICY";

/// Everything the console loop needs.
pub struct ConsoleServices {
    forwarder: BridgeForwarder,
    pending: PendingTasks,
}

impl ConsoleServices {
    /// Build the forwarder from the config in `dir` (defaults when `None`)
    /// plus an optional policy override (the value of [`POLICY_ENV`]).
    pub fn init(dir: Option<&Path>, policy_override: Option<String>) -> Self {
        let config = resolve_config(dir, policy_override.as_deref());
        let pending = PendingTasks::default();
        let registry =
            commands::register(CommandRegistry::builder().with_builtins(), &pending).build();

        let config_path = dir.map(|d| d.join(CONFIG_FILE));
        info!(
            config = ?config_path,
            policy = ?config.error_policy,
            commands = ?registry.commands(),
            "console services initialised"
        );

        Self {
            forwarder: BridgeForwarder::new(jsbridge_native::platform_host(), registry, config),
            pending,
        }
    }

    pub fn forwarder(&self) -> &BridgeForwarder {
        &self.forwarder
    }

    /// Wait for deferred replies still in flight.
    pub async fn drain(&self) {
        commands::drain(&self.pending).await;
    }
}

/// Stored config (or defaults), with the policy override applied on top.
fn resolve_config(dir: Option<&Path>, policy_override: Option<&str>) -> BridgeConfig {
    let stored = match dir {
        Some(dir) => BridgeConfig::load(dir),
        None => Ok(None),
    };
    let mut config = match stored {
        Ok(Some(config)) => config,
        Ok(None) => BridgeConfig::default(),
        Err(e) => {
            warn!(error = %e, "unreadable config; using defaults");
            BridgeConfig::default()
        }
    };

    if let Some(raw) = policy_override {
        match raw.parse::<ErrorPolicy>() {
            Ok(policy) => config.error_policy = policy,
            Err(e) => warn!(error = %e, "ignoring {POLICY_ENV}"),
        }
    }
    config
}
