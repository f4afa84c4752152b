// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Built-in commands, opt-in through `RegistryBuilder::with_builtins`.

use jsbridge_core::error::Result;
use jsbridge_core::{Request, Response};

use crate::dispatcher::{DispatchContext, Reply};

/// Liveness check: `{"msg":"ping"}` → `{"msg":"pong"}`.
pub fn ping(_request: &Request, _ctx: &mut DispatchContext<'_>) -> Result<Reply> {
    Ok(Reply::Ready(Response::for_command("pong")))
}

/// Send the request body straight back.
pub fn echo(request: &Request, _ctx: &mut DispatchContext<'_>) -> Result<Reply> {
    Ok(Reply::Ready(Response::from_map(request.body().clone())))
}

/// Report which host the bridge runs in.
pub fn platform(_request: &Request, ctx: &mut DispatchContext<'_>) -> Result<Reply> {
    Ok(Reply::Ready(
        Response::for_command("platform").with("name", ctx.host().platform_name()),
    ))
}
