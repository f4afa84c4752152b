// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Boundary contracts between the dispatcher and the platform it runs in.

/// The host the bridge is embedded in (Android activity, iOS view
/// controller, desktop test harness).
///
/// Handlers receive it through their dispatch context for the duration of one
/// call only; nothing in the bridge keeps a host reference between requests.
pub trait HostEnvironment: Send + Sync {
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// Single-shot delivery of a result string into the caller's context.
///
/// Implementations are consumed on use, so a callback can fire at most once.
/// There is no cancellation or timeout at this layer: a callback either
/// produces exactly one result or never resolves.
pub trait ResponseCallback: Send {
    fn on_result(self: Box<Self>, result: String);
}

impl<F> ResponseCallback for F
where
    F: FnOnce(String) + Send,
{
    fn on_result(self: Box<Self>, result: String) {
        (*self)(result)
    }
}
