// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the bridge.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the request field that carries the command identifier.
pub const COMMAND_FIELD: &str = "msg";

/// Identifier attached to one dispatch for log correlation.
///
/// Never sent to JavaScript; replies are matched by closure capture, not by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchId(pub Uuid);

impl DispatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DispatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happened to the callback of a successfully dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The callback received the response payload.
    Responded,
    /// The handler took the responder and will resolve it later.
    Deferred,
    /// There was no callback to deliver to.
    Unanswered,
}
