// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command table mapping identifiers to handlers.
//
// Built once at startup and shared read-only behind an `Arc`; lookups are
// exact string matches.

use std::collections::HashMap;
use std::sync::Arc;

use jsbridge_core::Request;
use jsbridge_core::error::Result;
use tracing::warn;

use crate::builtins;
use crate::dispatcher::{DispatchContext, Reply};

/// A command handler.
pub type Handler = Arc<dyn Fn(&Request, &mut DispatchContext<'_>) -> Result<Reply> + Send + Sync>;

/// Immutable command table.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Handler>,
}

impl CommandRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A table with no commands; every request is an unknown command.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn get(&self, command: &str) -> Option<&Handler> {
        self.handlers.get(command)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands())
            .finish()
    }
}

/// Collects handlers before the table is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: HashMap<String, Handler>,
}

impl RegistryBuilder {
    /// Add a handler. A second registration under the same name replaces the first.
    pub fn register<F>(mut self, command: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request, &mut DispatchContext<'_>) -> Result<Reply> + Send + Sync + 'static,
    {
        let command: String = command.into();
        if self.handlers.insert(command.clone(), Arc::new(handler)).is_some() {
            warn!(command = %command, "handler replaced by a later registration");
        }
        self
    }

    /// Add `ping`, `echo` and `platform`.
    pub fn with_builtins(self) -> Self {
        self.register("ping", builtins::ping)
            .register("echo", builtins::echo)
            .register("platform", builtins::platform)
    }

    pub fn build(self) -> Arc<CommandRegistry> {
        Arc::new(CommandRegistry {
            handlers: self.handlers,
        })
    }
}

#[cfg(test)]
mod tests {
    use jsbridge_core::Response;

    use super::*;

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = CommandRegistry::empty();
        assert!(registry.is_empty());
        assert!(!registry.contains(""));
        assert!(registry.get("ping").is_none());
    }

    #[test]
    fn builtins_are_registered() {
        let registry = CommandRegistry::builder().with_builtins().build();
        assert_eq!(registry.commands(), vec!["echo", "ping", "platform"]);
    }

    #[test]
    fn lookup_is_exact() {
        let registry = CommandRegistry::builder().with_builtins().build();
        assert!(registry.contains("ping"));
        assert!(!registry.contains("Ping"));
        assert!(!registry.contains("pin"));
        assert!(!registry.contains(" ping"));
    }

    #[test]
    fn later_registration_wins() {
        let registry = CommandRegistry::builder()
            .register("ping", builtins::ping)
            .register("ping", |_req: &Request, _ctx: &mut DispatchContext<'_>| {
                Ok(Reply::Ready(Response::for_command("override")))
            })
            .build();
        assert_eq!(registry.len(), 1);
    }
}
