// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File name used when the configuration is persisted to disk.
pub const CONFIG_FILE: &str = "jsbridge.json";

/// How request failures are surfaced to the JavaScript caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Parse errors, unknown commands and handler failures deliver nothing.
    /// The callback never fires; failures are only logged.
    Silent,
    /// Every request resolves its callback exactly once, failures with an
    /// error envelope.
    #[default]
    Report,
}

impl std::str::FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Ok(Self::Silent),
            "report" => Ok(Self::Report),
            other => Err(format!("unknown error policy {other:?}")),
        }
    }
}

/// Runtime settings for a bridge forwarder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Failure reporting behaviour.
    pub error_policy: ErrorPolicy,
    /// Log raw payloads at debug level. When off only payload lengths are logged.
    pub trace_payloads: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Report,
            trace_payloads: false,
        }
    }
}

impl BridgeConfig {
    /// Load the configuration stored in `dir`, or `None` if there is none.
    ///
    /// A file that exists but cannot be parsed is an error, so a typo in the
    /// policy name is not silently replaced by defaults.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    /// Write the configuration into `dir`.
    pub fn persist(&self, dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(dir.join(CONFIG_FILE), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_report_errors() {
        let config = BridgeConfig::default();
        assert_eq!(config.error_policy, ErrorPolicy::Report);
        assert!(!config.trace_payloads);
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(BridgeConfig::load(dir.path()).expect("load").is_none());
    }

    #[test]
    fn persist_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = BridgeConfig {
            error_policy: ErrorPolicy::Silent,
            trace_payloads: true,
        };
        config.persist(dir.path()).expect("persist");

        let loaded = BridgeConfig::load(dir.path()).expect("load");
        assert_eq!(loaded, Some(config));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{"trace_payloads": true}"#)
            .expect("write");

        let loaded = BridgeConfig::load(dir.path()).expect("load").expect("present");
        assert_eq!(loaded.error_policy, ErrorPolicy::Report);
        assert!(loaded.trace_payloads);
    }

    #[test]
    fn bad_policy_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{"error_policy": "loud"}"#)
            .expect("write");

        assert!(BridgeConfig::load(dir.path()).is_err());
    }

    #[test]
    fn policy_from_str() {
        assert_eq!("SILENT".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Silent));
        assert_eq!(" report ".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Report));
        assert!("verbose".parse::<ErrorPolicy>().is_err());
    }
}
