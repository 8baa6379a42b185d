//! gitpanel RPC Server: JSON-RPC over stdin/stdout for a webview or Electron shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"form.submit", "params":{"provider":"github","owner":"...","repo":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Fetch completions are pushed as they settle:
//!           {"event":"render", "container":"github-commits", "status":"loaded", "html":"...", ...}

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use gitpanel::app::App;
use gitpanel::rpc_handler::{complete_fetch, dispatch_call, log_preview};

use serde_json::{json, Value};

/// Writes one protocol line; stdout is shared with the fetch tasks.
fn emit(message: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if writeln!(out, "{}", message).and_then(|_| out.flush()).is_err() {
        log::error!("failed to write to stdout");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config_path = std::env::var("GITPANEL_CONFIG").ok();
    let app = match App::new(config_path) {
        Ok(app) => Arc::new(Mutex::new(app)),
        Err(e) => {
            log::error!("failed to initialize gitpanel: {}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let client = match app.lock() {
        Ok(a) => a.client.clone(),
        Err(e) => {
            log::error!("app state poisoned: {}", e);
            std::process::exit(1);
        }
    };

    emit(&json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}));

    let mut in_flight = Vec::new();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        log::debug!("[RPC] {}", log_preview(&line));

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&json!({"id":null,"error":format!("parse error: {}",e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        // Each fetch settles on its own; none waits for its siblings.
        dispatch_call(
            &app,
            method,
            &params,
            |reply| match reply {
                Ok(result) => emit(&json!({"id": id, "result": result})),
                Err(err) => emit(&json!({"id": id, "error": err})),
            },
            |pending| {
                let app = Arc::clone(&app);
                let client = client.clone();
                in_flight.push(runtime.spawn(async move {
                    if let Some(event) = complete_fetch(&app, &client, pending).await {
                        emit(&event);
                    }
                }));
            },
        );
        in_flight.retain(|handle| !handle.is_finished());
    }

    // Let in-flight fetches deliver their events before exiting.
    runtime.block_on(futures::future::join_all(in_flight));
}
