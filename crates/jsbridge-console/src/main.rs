// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// jsbridge console — stands in for the web view.
//
// Each stdin line is a payload from "JavaScript" and goes through
// `receive_message_from_js`. A line starting with `!` is instead pushed with
// `send_message_to_js`. Every callback delivery is printed to stdout on its
// own line; logs go to stderr.

mod services;

use jsbridge_core::error::Result;
use jsbridge_native::Responder;
use tokio::io::{AsyncBufReadExt, BufReader};

use services::console_services::{ConsoleServices, POLICY_ENV};
use services::data_dir;

/// Marks a line as a native → JS push.
const PUSH_PREFIX: char = '!';

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("jsbridge console starting");

    let config_dir = match data_dir::config_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            tracing::warn!(error = %e, "no usable config directory; using defaults");
            None
        }
    };
    let svc = ConsoleServices::init(config_dir.as_deref(), std::env::var(POLICY_ENV).ok());
    jsbridge_native::install(svc.forwarder().clone())?;
    let forwarder = jsbridge_native::installed()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(payload) = line.strip_prefix(PUSH_PREFIX) {
            forwarder.send_message_to_js(payload, Some(print_responder()));
            continue;
        }

        if let Err(e) = forwarder.receive_message_from_js(line, Some(print_responder())) {
            tracing::debug!(error = %e, "request failed");
        }
    }

    svc.drain().await;
    tracing::info!("stdin closed; exiting");
    Ok(())
}

fn print_responder() -> Responder {
    Responder::new(|payload: String| println!("{payload}"))
}
