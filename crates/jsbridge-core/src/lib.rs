// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// jsbridge — Envelope types, errors and configuration shared across all crates.

pub mod config;
pub mod envelope;
pub mod error;
pub mod types;

pub use config::{BridgeConfig, ErrorPolicy};
pub use envelope::{Request, Response};
pub use error::BridgeError;
pub use types::*;
