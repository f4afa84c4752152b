// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Owner of one request's callback.

use jsbridge_core::Response;
use jsbridge_core::error::Result;
use tracing::debug;

use crate::traits::ResponseCallback;

/// Holds the callback for a single request until it is resolved.
///
/// `resolve` consumes the responder, which is what makes "at most one
/// invocation per request" hold. A responder is `Send`, so a handler doing
/// slow work can move it to another thread and resolve it from there; the
/// callback implementation is responsible for getting back onto the thread
/// the web view expects.
pub struct Responder {
    callback: Option<Box<dyn ResponseCallback>>,
}

impl Responder {
    pub fn new(callback: impl ResponseCallback + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Deliver `payload` to the caller unmodified.
    pub fn resolve(mut self, payload: impl Into<String>) {
        if let Some(callback) = self.callback.take() {
            callback.on_result(payload.into());
        }
    }

    /// Serialize `response` and deliver it.
    pub fn respond(self, response: &Response) -> Result<()> {
        let payload = response.to_payload()?;
        self.resolve(payload);
        Ok(())
    }
}

impl Drop for Responder {
    fn drop(&mut self) {
        if self.callback.is_some() {
            debug!("responder dropped unresolved; caller will never hear back");
        }
    }
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn resolve_delivers_payload_unmodified() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let responder = Responder::new(move |s: String| sink.lock().unwrap().push(s));

        responder.resolve("  raw {not json}  ");
        assert_eq!(*seen.lock().unwrap(), vec!["  raw {not json}  ".to_string()]);
    }

    #[test]
    fn respond_serializes_response() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let responder = Responder::new(move |s: String| *sink.lock().unwrap() = Some(s));

        responder
            .respond(&Response::for_command("pong"))
            .expect("respond");
        assert_eq!(seen.lock().unwrap().as_deref(), Some(r#"{"msg":"pong"}"#));
    }

    #[test]
    fn dropping_unresolved_never_calls_back() {
        let seen = Arc::new(Mutex::new(0_u32));
        let sink = Arc::clone(&seen);
        let responder = Responder::new(move |_s: String| *sink.lock().unwrap() += 1);

        drop(responder);
        assert_eq!(*seen.lock().unwrap(), 0);
    }

    #[test]
    fn resolves_from_another_thread() {
        let (tx, rx) = std::sync::mpsc::channel();
        let responder = Responder::new(move |s: String| tx.send(s).unwrap());

        std::thread::spawn(move || responder.resolve("later"))
            .join()
            .unwrap();
        assert_eq!(rx.recv().unwrap(), "later");
    }
}
