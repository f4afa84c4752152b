// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for jsbridge.

use thiserror::Error;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Request errors --
    #[error("payload is not a JSON object: {0}")]
    Parse(String),

    #[error("request has no usable `msg` command identifier")]
    MissingCommand,

    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    #[error("handler for {command:?} failed: {message}")]
    Handler { command: String, message: String },

    // -- Response errors --
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Native boundary --
    #[error("payload pointer is null or not valid UTF-8")]
    InvalidPayload,

    #[error("a bridge forwarder is already installed")]
    AlreadyInstalled,

    #[error("no bridge forwarder has been installed")]
    NotInstalled,

    #[error("platform bridge error: {0}")]
    Platform(String),

    // -- Configuration --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Shorthand for a handler failure.
    pub fn handler(command: impl Into<String>, message: impl ToString) -> Self {
        Self::Handler {
            command: command.into(),
            message: message.to_string(),
        }
    }

    /// Stable code written into the `error.kind` field of an error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse_error",
            Self::MissingCommand => "missing_command",
            Self::UnknownCommand(_) => "unknown_command",
            Self::Handler { .. } | Self::Serialization(_) => "handler_error",
            Self::InvalidPayload => "invalid_payload",
            Self::AlreadyInstalled | Self::NotInstalled => "not_installed",
            Self::Platform(_) => "platform_error",
            Self::Io(_) => "io_error",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
