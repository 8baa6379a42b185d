//! WebView shell for gitpanel using `wry` + `tao`.
//!
//! - The page is served from the `gp://` custom protocol.
//! - JS → Rust: `window.ipc.postMessage({"id", "method", "params"})`, dispatched
//!   through `rpc_handler::dispatch_call`; the reply is queued before any fetch starts.
//! - Rust → JS: `__gp_reply(id, result, error)` for replies and
//!   `__gp_render(event)` whenever a fetch settles.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::WindowBuilder;
use tokio::runtime::Runtime;
use wry::WebViewBuilder;

use crate::app::App;
use crate::rpc_handler::{complete_fetch, dispatch_call, log_preview};
use crate::services::provider_client::ProviderDataClient;

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
}

const INDEX_HTML: &str = include_str!("../../resources/ui/index.html");
const PANEL_JS: &str = include_str!("../../resources/ui/panel.js");

fn index_html() -> String {
    INDEX_HTML.replace("/*__PANEL_JS__*/", PANEL_JS)
}

fn handle_ipc(
    app: &Arc<Mutex<App>>,
    client: &ProviderDataClient,
    runtime: &Runtime,
    proxy: &EventLoopProxy<UserEvent>,
    message: &str,
) {
    let msg: Value = match serde_json::from_str(message) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("[IPC] malformed message: {}", e);
            return;
        }
    };
    let id = msg.get("id").cloned().unwrap_or(Value::Null);
    let Some(method) = msg.get("method").and_then(Value::as_str) else {
        return;
    };
    let params = msg.get("params").cloned().unwrap_or(json!({}));

    dispatch_call(
        app,
        method,
        &params,
        |reply| {
            let script = match reply {
                Ok(result) => format!("if(window.__gp_reply)__gp_reply({},{},null)", id, result),
                Err(err) => format!("if(window.__gp_reply)__gp_reply({},null,{})", id, json!(err)),
            };
            let _ = proxy.send_event(UserEvent::EvalScript(script));
        },
        |pending| {
            let app = Arc::clone(app);
            let client = client.clone();
            let proxy = proxy.clone();
            runtime.spawn(async move {
                if let Some(event) = complete_fetch(&app, &client, pending).await {
                    let _ = proxy.send_event(UserEvent::EvalScript(format!(
                        "if(window.__gp_render)__gp_render({})",
                        event
                    )));
                }
            });
        },
    );
}

// ─── Main entry point ───

pub fn run() {
    let app = match App::new(std::env::var("GITPANEL_CONFIG").ok()) {
        Ok(app) => Arc::new(Mutex::new(app)),
        Err(e) => {
            log::error!("failed to initialize gitpanel: {}", e);
            return;
        }
    };
    let client = match app.lock() {
        Ok(a) => a.client.clone(),
        Err(e) => {
            log::error!("app state poisoned: {}", e);
            return;
        }
    };
    let runtime = match Runtime::new() {
        Ok(rt) => Arc::new(rt),
        Err(e) => {
            log::error!("failed to start async runtime: {}", e);
            return;
        }
    };

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = match WindowBuilder::new()
        .with_title("gitpanel")
        .with_inner_size(tao::dpi::LogicalSize::new(1200.0, 800.0))
        .build(&event_loop)
    {
        Ok(w) => w,
        Err(e) => {
            log::error!("failed to create window: {}", e);
            return;
        }
    };

    let ipc_app = Arc::clone(&app);
    let ipc_runtime = Arc::clone(&runtime);
    let ipc_proxy = proxy.clone();

    let builder = WebViewBuilder::new()
        .with_custom_protocol("gp".into(), move |_wv_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(index_html().into_bytes().into())
                .unwrap_or_default()
        })
        .with_url("gp://localhost/")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            log::debug!("[IPC] {}", log_preview(body));
            handle_ipc(&ipc_app, &client, &ipc_runtime, &ipc_proxy, body);
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = match window.default_vbox() {
            Some(vbox) => vbox,
            None => {
                log::error!("failed to get GTK vbox");
                return;
            }
        };
        builder.build_gtk(vbox)
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window);

    let webview = match webview {
        Ok(wv) => wv,
        Err(e) => {
            log::error!("failed to create WebView: {}", e);
            return;
        }
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,

            Event::UserEvent(UserEvent::EvalScript(js)) => {
                let _ = webview.evaluate_script(&js);
            }

            _ => {}
        }
    });
}
