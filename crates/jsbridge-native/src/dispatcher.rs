// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Task dispatcher: route one parsed request to its handler and resolve the
// callback with the result.
//
// Everything runs synchronously on the calling thread. A handler that needs to
// finish later takes the responder with `DispatchContext::defer` and returns
// `Reply::Deferred`; the dispatcher then leaves the callback alone.
//
// Failures never unwind out of `invoke`. Under `ErrorPolicy::Report` the
// callback is resolved once with an error envelope; under
// `ErrorPolicy::Silent` nothing is delivered and the failure is only logged.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use jsbridge_core::error::{BridgeError, Result};
use jsbridge_core::{Delivery, DispatchId, ErrorPolicy, Request, Response};
use tracing::{debug, error, info_span, warn};

use crate::forwarder::BridgeForwarder;
use crate::registry::CommandRegistry;
use crate::responder::Responder;
use crate::traits::HostEnvironment;

/// What a handler produced.
#[derive(Debug)]
pub enum Reply {
    /// Serialize this and hand it to the callback now.
    Ready(Response),
    /// The handler took the responder and resolves it itself.
    Deferred,
}

/// Per-request view handed to a handler.
///
/// Lives for one dispatch call. Handlers that outlive the call must copy out
/// what they need (the responder, a clone of the forwarder).
pub struct DispatchContext<'a> {
    id: DispatchId,
    command: String,
    host: &'a dyn HostEnvironment,
    forwarder: &'a BridgeForwarder,
    responder: Option<Responder>,
    deferred: bool,
}

impl<'a> DispatchContext<'a> {
    pub fn id(&self) -> DispatchId {
        self.id
    }

    /// The command identifier being dispatched.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn host(&self) -> &'a dyn HostEnvironment {
        self.host
    }

    /// The forwarder that received this request, e.g. for pushing messages
    /// to JavaScript with `send_message_to_js`.
    pub fn forwarder(&self) -> &'a BridgeForwarder {
        self.forwarder
    }

    /// Take ownership of the callback to resolve it later.
    ///
    /// Returns `None` if the caller supplied no callback or it was already
    /// taken. After calling this the handler must return `Reply::Deferred`.
    pub fn defer(&mut self) -> Option<Responder> {
        self.deferred = true;
        self.responder.take()
    }
}

/// Dispatches a single request. Construct, call [`invoke`](Self::invoke), done.
pub struct TaskDispatcher<'a> {
    registry: &'a CommandRegistry,
    policy: ErrorPolicy,
    request: Request,
    ctx: DispatchContext<'a>,
}

impl<'a> TaskDispatcher<'a> {
    pub fn new(forwarder: &'a BridgeForwarder, request: Request, responder: Option<Responder>) -> Self {
        Self {
            registry: forwarder.registry(),
            policy: forwarder.config().error_policy,
            request,
            ctx: DispatchContext {
                id: DispatchId::new(),
                command: String::new(),
                host: forwarder.host(),
                forwarder,
                responder,
                deferred: false,
            },
        }
    }

    /// Run the request to completion.
    ///
    /// `Ok` describes how the callback was handled. `Err` carries the failure
    /// after it has been reported (or swallowed) according to the policy.
    pub fn invoke(mut self) -> Result<Delivery> {
        let span = info_span!("dispatch", id = %self.ctx.id);
        let _enter = span.enter();

        match self.run() {
            Ok(delivery) => {
                debug!(command = %self.ctx.command, ?delivery, "dispatch complete");
                Ok(delivery)
            }
            Err(err) => {
                let command = self.request.command().ok();
                report_failure(self.policy, command.as_deref(), err, self.ctx.responder.take())
            }
        }
    }

    fn run(&mut self) -> Result<Delivery> {
        let command = self.request.command()?;
        self.ctx.command.clone_from(&command);

        let registry = self.registry;
        let handler = registry
            .get(&command)
            .ok_or_else(|| BridgeError::UnknownCommand(command.clone()))?;

        debug!(command = %command, "invoking handler");
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            (handler.as_ref())(&self.request, &mut self.ctx)
        }));
        let reply = match outcome {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => return Err(as_handler_error(&command, err)),
            Err(panic) => {
                return Err(BridgeError::handler(&command, panic_message(panic.as_ref())));
            }
        };

        match reply {
            Reply::Ready(_) if self.ctx.deferred => Err(BridgeError::handler(
                &command,
                "returned a ready response after deferring",
            )),
            Reply::Ready(response) => {
                let payload = response.to_payload()?;
                match self.ctx.responder.take() {
                    Some(responder) => {
                        responder.resolve(payload);
                        Ok(Delivery::Responded)
                    }
                    None => Ok(Delivery::Unanswered),
                }
            }
            Reply::Deferred if self.ctx.deferred => Ok(Delivery::Deferred),
            Reply::Deferred => Err(BridgeError::handler(
                &command,
                "deferred without taking the responder",
            )),
        }
    }
}

/// Apply the error policy to a failed request and hand the error back.
pub(crate) fn report_failure(
    policy: ErrorPolicy,
    command: Option<&str>,
    err: BridgeError,
    responder: Option<Responder>,
) -> Result<Delivery> {
    match (policy, responder) {
        (ErrorPolicy::Report, Some(responder)) => {
            warn!(kind = err.code(), error = %err, "request failed; reporting to caller");
            if let Err(e) = responder.respond(&Response::error(command, &err)) {
                error!(error = %e, "failed to serialize error envelope");
            }
        }
        (ErrorPolicy::Report, None) => {
            warn!(kind = err.code(), error = %err, "request failed; no callback to report to");
        }
        (ErrorPolicy::Silent, responder) => {
            warn!(kind = err.code(), error = %err, "request failed; dropped under silent policy");
            // Unresolved on purpose: the caller gets nothing.
            drop(responder);
        }
    }
    Err(err)
}

fn as_handler_error(command: &str, err: BridgeError) -> BridgeError {
    match err {
        BridgeError::Handler { .. } => err,
        other => BridgeError::handler(command, other),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
