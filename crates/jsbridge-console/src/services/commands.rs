// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Console-only commands.
//
// `delay` shows the deferred-reply pattern: the handler takes the responder,
// moves it into a tokio task and returns immediately; the task resolves it
// once the timer fires.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use jsbridge_core::error::{BridgeError, Result};
use jsbridge_core::{Request, Response};
use jsbridge_native::{DispatchContext, RegistryBuilder, Reply};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default wait for `delay` when the request has no `ms` field.
const DEFAULT_DELAY_MS: u64 = 250;

/// Upper bound on `ms`, so a typo cannot park the console for hours.
const MAX_DELAY_MS: u64 = 60_000;

/// Background tasks still holding a responder.
pub type PendingTasks = Arc<Mutex<Vec<JoinHandle<()>>>>;

/// Add the console commands to `builder`.
pub fn register(builder: RegistryBuilder, pending: &PendingTasks) -> RegistryBuilder {
    let pending = Arc::clone(pending);
    builder.register(
        "delay",
        move |request: &Request, ctx: &mut DispatchContext<'_>| delay(request, ctx, &pending),
    )
}

/// `{"msg":"delay","ms":500}` → after 500 ms, `{"msg":"delay","slept_ms":500}`.
fn delay(request: &Request, ctx: &mut DispatchContext<'_>, pending: &PendingTasks) -> Result<Reply> {
    let ms: u64 = request.param("ms")?.unwrap_or(DEFAULT_DELAY_MS);
    if ms > MAX_DELAY_MS {
        return Err(BridgeError::handler(
            ctx.command(),
            format!("ms must be at most {MAX_DELAY_MS}"),
        ));
    }

    let Some(responder) = ctx.defer() else {
        debug!("delay without a callback; nothing to wait for");
        return Ok(Reply::Deferred);
    };
    let command = ctx.command().to_owned();

    let handle = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        let response = Response::for_command(command).with("slept_ms", ms);
        if let Err(e) = responder.respond(&response) {
            warn!(error = %e, "failed to deliver delayed response");
        }
    });

    track(pending, handle)?;
    Ok(Reply::Deferred)
}

/// Remember `handle` for [`drain`], forgetting tasks that already finished.
fn track(pending: &PendingTasks, handle: JoinHandle<()>) -> Result<()> {
    let mut tasks = pending
        .lock()
        .map_err(|_| BridgeError::handler("delay", "pending task list poisoned"))?;
    tasks.retain(|h| !h.is_finished());
    tasks.push(handle);
    Ok(())
}

/// Wait for every outstanding deferred reply.
pub async fn drain(pending: &PendingTasks) {
    let handles = match pending.lock() {
        Ok(mut guard) => std::mem::take(&mut *guard),
        Err(_) => {
            warn!("pending task list poisoned; not waiting");
            return;
        }
    };
    for handle in handles {
        if let Err(e) = handle.await {
            warn!(error = %e, "deferred task failed");
        }
    }
}
