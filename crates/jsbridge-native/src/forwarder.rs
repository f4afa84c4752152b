// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge forwarder: the two entry points the web view layer calls.

use std::sync::Arc;

use jsbridge_core::error::Result;
use jsbridge_core::{BridgeConfig, Delivery, Request};
use tracing::debug;

use crate::dispatcher::{TaskDispatcher, report_failure};
use crate::registry::CommandRegistry;
use crate::responder::Responder;
use crate::traits::HostEnvironment;

/// Receives payloads from JavaScript and pushes payloads back to it.
///
/// Cheap to clone; the host and command table are shared.
#[derive(Clone)]
pub struct BridgeForwarder {
    host: Arc<dyn HostEnvironment>,
    registry: Arc<CommandRegistry>,
    config: BridgeConfig,
}

impl BridgeForwarder {
    pub fn new(
        host: Arc<dyn HostEnvironment>,
        registry: Arc<CommandRegistry>,
        config: BridgeConfig,
    ) -> Self {
        Self {
            host,
            registry,
            config,
        }
    }

    pub fn host(&self) -> &dyn HostEnvironment {
        self.host.as_ref()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Handle a payload sent from JavaScript.
    ///
    /// The payload must be a JSON object carrying a `msg` command identifier.
    /// Never panics; every failure comes back as `Err` after the configured
    /// error policy has been applied to `callback`.
    pub fn receive_message_from_js(
        &self,
        payload: &str,
        callback: Option<Responder>,
    ) -> Result<Delivery> {
        self.trace("receive_message_from_js", payload);

        match Request::parse(payload) {
            Ok(request) => TaskDispatcher::new(self, request, callback).invoke(),
            Err(err) => report_failure(self.config.error_policy, None, err, callback),
        }
    }

    /// Push a payload from native code into JavaScript.
    ///
    /// The callback receives `payload` unchanged. With no callback this does
    /// nothing.
    pub fn send_message_to_js(&self, payload: &str, callback: Option<Responder>) -> Delivery {
        self.trace("send_message_to_js", payload);

        match callback {
            Some(responder) => {
                responder.resolve(payload);
                Delivery::Responded
            }
            None => Delivery::Unanswered,
        }
    }

    fn trace(&self, direction: &'static str, payload: &str) {
        if self.config.trace_payloads {
            debug!(direction, payload, "bridge payload");
        } else {
            debug!(direction, len = payload.len(), "bridge payload");
        }
    }
}

impl std::fmt::Debug for BridgeForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeForwarder")
            .field("platform", &self.host.platform_name())
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use jsbridge_core::ErrorPolicy;
    use jsbridge_core::error::BridgeError;
    use serde_json::Value;

    use super::*;
    use crate::stub::StubHost;

    type Seen = Arc<Mutex<Vec<String>>>;

    fn capture(seen: &Seen) -> Option<Responder> {
        let sink = Arc::clone(seen);
        Some(Responder::new(move |s: String| sink.lock().unwrap().push(s)))
    }

    fn forwarder(policy: ErrorPolicy) -> BridgeForwarder {
        BridgeForwarder::new(
            Arc::new(StubHost),
            CommandRegistry::builder().with_builtins().build(),
            BridgeConfig {
                error_policy: policy,
                trace_payloads: true,
            },
        )
    }

    #[test]
    fn ping_gets_pong() {
        let fwd = forwarder(ErrorPolicy::Silent);
        let seen = Seen::default();

        let delivery = fwd
            .receive_message_from_js(r#"{"msg": "ping"}"#, capture(&seen))
            .expect("dispatch");

        assert_eq!(delivery, Delivery::Responded);
        assert_eq!(*seen.lock().unwrap(), vec![r#"{"msg":"pong"}"#.to_string()]);
    }

    #[test]
    fn not_json_silent_is_dropped_without_panic() {
        let fwd = forwarder(ErrorPolicy::Silent);
        let seen = Seen::default();

        let result = fwd.receive_message_from_js("not-json", capture(&seen));

        assert!(matches!(result, Err(BridgeError::Parse(_))));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn not_json_report_resolves_once_with_parse_error() {
        let fwd = forwarder(ErrorPolicy::Report);
        let seen = Seen::default();

        let result = fwd.receive_message_from_js("not-json", capture(&seen));

        assert!(result.is_err());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let value: Value = serde_json::from_str(&seen[0]).unwrap();
        assert_eq!(value["msg"], Value::Null);
        assert_eq!(value["error"]["kind"], "parse_error");
    }

    #[test]
    fn json_array_is_a_parse_error() {
        let fwd = forwarder(ErrorPolicy::Silent);
        let seen = Seen::default();

        let result = fwd.receive_message_from_js(r#"[{"msg": "ping"}]"#, capture(&seen));

        assert!(matches!(result, Err(BridgeError::Parse(_))));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_command_silent_does_nothing() {
        let fwd = forwarder(ErrorPolicy::Silent);
        let seen = Seen::default();

        let result = fwd.receive_message_from_js(r#"{"msg": ""}"#, capture(&seen));

        assert!(matches!(result, Err(BridgeError::UnknownCommand(_))));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn echo_returns_the_request_body() {
        let fwd = forwarder(ErrorPolicy::Report);
        let seen = Seen::default();

        fwd.receive_message_from_js(r#"{"msg": "echo", "n": [1, 2]}"#, capture(&seen))
            .expect("dispatch");

        let value: Value = serde_json::from_str(&seen.lock().unwrap()[0]).unwrap();
        assert_eq!(value, serde_json::json!({"msg": "echo", "n": [1, 2]}));
    }

    #[test]
    fn send_hello_is_delivered_unmodified() {
        let fwd = forwarder(ErrorPolicy::Report);
        let seen = Seen::default();

        let delivery = fwd.send_message_to_js("hello", capture(&seen));

        assert_eq!(delivery, Delivery::Responded);
        assert_eq!(*seen.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[test]
    fn send_without_callback_is_a_no_op() {
        let fwd = forwarder(ErrorPolicy::Report);
        assert_eq!(fwd.send_message_to_js("hello", None), Delivery::Unanswered);
    }

    #[test]
    fn send_does_not_validate_payload() {
        let fwd = forwarder(ErrorPolicy::Report);
        let seen = Seen::default();

        fwd.send_message_to_js("not-json", capture(&seen));
        assert_eq!(*seen.lock().unwrap(), vec!["not-json".to_string()]);
    }

    #[test]
    fn handler_can_push_through_the_forwarder() {
        let pushed = Seen::default();
        let sink = Arc::clone(&pushed);
        let registry = CommandRegistry::builder()
            .register(
                "notify",
                move |_req: &Request, ctx: &mut crate::DispatchContext<'_>| {
                    let push = Arc::clone(&sink);
                    ctx.forwarder().send_message_to_js(
                        r#"{"event":"tick"}"#,
                        Some(Responder::new(move |s: String| push.lock().unwrap().push(s))),
                    );
                    Ok(crate::Reply::Ready(jsbridge_core::Response::for_command("notify")))
                },
            )
            .build();
        let fwd = BridgeForwarder::new(Arc::new(StubHost), registry, BridgeConfig::default());
        let seen = Seen::default();

        fwd.receive_message_from_js(r#"{"msg": "notify"}"#, capture(&seen))
            .expect("dispatch");

        assert_eq!(*pushed.lock().unwrap(), vec![r#"{"event":"tick"}"#.to_string()]);
        assert_eq!(*seen.lock().unwrap(), vec![r#"{"msg":"notify"}"#.to_string()]);
    }

    #[test]
    fn concurrent_dispatch_keeps_replies_apart() {
        let fwd = forwarder(ErrorPolicy::Report);

        std::thread::scope(|scope| {
            for thread in 0..8 {
                let fwd = &fwd;
                scope.spawn(move || {
                    for n in 0..25 {
                        let seen = Seen::default();
                        let payload = format!(r#"{{"msg": "echo", "thread": {thread}, "n": {n}}}"#);

                        let delivery = fwd
                            .receive_message_from_js(&payload, capture(&seen))
                            .expect("dispatch");

                        assert_eq!(delivery, Delivery::Responded);
                        let seen = seen.lock().unwrap();
                        assert_eq!(seen.len(), 1);
                        let value: Value = serde_json::from_str(&seen[0]).unwrap();
                        assert_eq!(value["thread"], thread);
                        assert_eq!(value["n"], n);
                    }
                });
            }
        });
    }

    #[tokio::test]
    async fn deferred_reply_resolves_from_a_task() {
        let registry = CommandRegistry::builder()
            .register("later", |_req: &Request, ctx: &mut crate::DispatchContext<'_>| {
                if let Some(responder) = ctx.defer() {
                    tokio::spawn(async move {
                        tokio::task::yield_now().await;
                        responder.resolve(r#"{"msg":"done"}"#);
                    });
                }
                Ok(crate::Reply::Deferred)
            })
            .build();
        let fwd = BridgeForwarder::new(Arc::new(StubHost), registry, BridgeConfig::default());
        let (tx, rx) = tokio::sync::oneshot::channel();

        let delivery = fwd
            .receive_message_from_js(
                r#"{"msg": "later"}"#,
                Some(Responder::new(move |s: String| {
                    let _ = tx.send(s);
                })),
            )
            .expect("dispatch");

        assert_eq!(delivery, Delivery::Deferred);
        assert_eq!(rx.await.expect("resolved"), r#"{"msg":"done"}"#);
    }
}
