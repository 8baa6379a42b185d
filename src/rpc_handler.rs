//! RPC method handler for the gitpanel JSON-RPC protocol.
//!
//! `handle_method` answers synchronously and hands back any fetches the call
//! issued; the caller runs each of them with `complete_fetch`, which applies
//! the outcome and yields a `render` event for the page.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::dashboard::PendingFetch;
use crate::managers::tab_router::TabRouterTrait;
use crate::services::provider_client::ProviderDataClient;
use crate::types::provider::{repository_placeholder, Identity, Provider};

/// Reply to one RPC call plus the fetches it started.
#[derive(Debug)]
pub struct Dispatch {
    pub result: Value,
    pub pending: Vec<PendingFetch>,
}

impl Dispatch {
    fn reply(result: Value) -> Self {
        Self {
            result,
            pending: Vec::new(),
        }
    }
}

/// Longest prefix of an incoming message written to the log, in characters.
pub const LOG_PREVIEW_CHARS: usize = 200;

/// Start of `message` for logging, cut on a character boundary.
pub fn log_preview(message: &str) -> String {
    message.chars().take(LOG_PREVIEW_CHARS).collect()
}

fn str_param<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

fn provider_param(params: &Value) -> Result<Provider, String> {
    str_param(params, "provider")
        .ok_or("missing provider")?
        .parse::<Provider>()
        .map_err(|e| e.to_string())
}

/// Builds the identity of a form submission from its fields.
pub fn identity_from_params(params: &Value) -> Result<Identity, String> {
    let field = |key: &str| str_param(params, key).unwrap_or("");
    let identity = match provider_param(params)? {
        Provider::GitHub => Identity::github(field("owner"), field("repo")),
        Provider::GitLab => Identity::gitlab(field("projectId")),
        Provider::Unified => Identity::unified(field("gitProvider"), field("repository")),
    };
    identity.map_err(|e| e.to_string())
}

fn router_state(app: &App) -> Value {
    let router = app.dashboard.router();
    json!({
        "active": router.active_section(),
        "fragment": router.fragment(),
        "sections": router.nav_entries(),
    })
}

/// Dispatch a JSON-RPC method call.
///
/// Returns the reply value and the fetches to run, or an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Dispatch, String> {
    match method {
        "ping" => Ok(Dispatch::reply(json!({"pong": true}))),

        // ─── Router ───
        "router.load" => {
            let fragment = str_param(params, "fragment").unwrap_or("");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.dashboard.load_fragment(fragment);
            Ok(Dispatch::reply(router_state(&a)))
        }
        "router.navigate" => {
            let section = str_param(params, "section").ok_or("missing section")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.dashboard.navigate(section).map_err(|e| e.to_string())?;
            Ok(Dispatch::reply(router_state(&a)))
        }
        "router.state" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(Dispatch::reply(router_state(&a)))
        }

        // ─── Forms & filters ───
        "form.submit" => {
            let identity = identity_from_params(params)?;
            let state = str_param(params, "state");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let pending = a.dashboard.submit(identity, state);
            let containers: Vec<Value> = pending
                .iter()
                .filter_map(|p| {
                    let id = p.container();
                    a.dashboard.container(&id).map(|view| {
                        json!({"container": id.dom_id(), "status": view.status, "html": view.html})
                    })
                })
                .collect();
            Ok(Dispatch {
                result: json!({"containers": containers}),
                pending,
            })
        }
        "filter.branch" | "filter.state" => {
            let provider = provider_param(params)?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let pending = if method == "filter.branch" {
                a.dashboard.change_branch(provider, str_param(params, "branch"))
            } else {
                a.dashboard
                    .change_state(provider, str_param(params, "state").unwrap_or(""))
            };
            match pending {
                Some(p) => {
                    let id = p.container();
                    let html = a
                        .dashboard
                        .container(&id)
                        .map(|v| v.html.clone())
                        .unwrap_or_default();
                    Ok(Dispatch {
                        result: json!({"skipped": false, "container": id.dom_id(), "html": html}),
                        pending: vec![p],
                    })
                }
                None => Ok(Dispatch::reply(json!({"skipped": true}))),
            }
        }
        "form.placeholder" => {
            let git_provider = str_param(params, "gitProvider").unwrap_or("");
            Ok(Dispatch::reply(
                json!({"placeholder": repository_placeholder(git_provider)}),
            ))
        }

        // ─── State ───
        "view.state" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.dashboard.view_state())
                .map(Dispatch::reply)
                .map_err(|e| e.to_string())
        }
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(&a.settings)
                .map(Dispatch::reply)
                .map_err(|e| e.to_string())
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

/// Handles one call end to end: `reply` receives the answer before `spawn` is
/// handed any of the fetches the call started, so a fetch that settles at once
/// cannot be overwritten by its own loading placeholder.
pub fn dispatch_call<R, S>(app: &Mutex<App>, method: &str, params: &Value, reply: R, mut spawn: S)
where
    R: FnOnce(Result<Value, String>),
    S: FnMut(PendingFetch),
{
    match handle_method(app, method, params) {
        Ok(dispatch) => {
            reply(Ok(dispatch.result));
            for pending in dispatch.pending {
                spawn(pending);
            }
        }
        Err(err) => reply(Err(err)),
    }
}

/// Runs one issued fetch, applies it and returns the `render` event to push to
/// the page, or `None` if the response was superseded while in flight.
pub async fn complete_fetch(
    app: &Mutex<App>,
    client: &ProviderDataClient,
    pending: PendingFetch,
) -> Option<Value> {
    let outcome = pending.run(client).await;
    let update = {
        let mut a = match app.lock() {
            Ok(a) => a,
            Err(e) => {
                log::error!(
                    "app state poisoned, dropping {} update: {}",
                    outcome.ticket.container.dom_id(),
                    e
                );
                return None;
            }
        };
        a.dashboard.apply(outcome)?
    };
    let mut event = serde_json::to_value(update).ok()?;
    if let Some(obj) = event.as_object_mut() {
        obj.insert("event".to_string(), json!("render"));
    }
    Some(event)
}
