//! Unit tests for the RPC handler: every JSON-RPC method dispatched by `handle_method`,
//! through the same code path used by the `gitpanel-rpc` binary.

use std::sync::Mutex;

use mockito::Matcher;
use serde_json::{json, Value};

use gitpanel::app::App;
use gitpanel::rpc_handler::{
    complete_fetch, dispatch_call, handle_method, identity_from_params, log_preview,
    LOG_PREVIEW_CHARS,
};
use gitpanel::types::provider::Identity;
use gitpanel::types::settings::ClientSettings;

fn setup_with(base_url: &str) -> Mutex<App> {
    let settings = ClientSettings {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..ClientSettings::default()
    };
    Mutex::new(App::with_settings(settings).expect("Failed to init App"))
}

fn setup() -> Mutex<App> {
    setup_with("http://127.0.0.1:8080")
}

fn call(app: &Mutex<App>, method: &str, params: Value) -> Value {
    handle_method(app, method, &params).unwrap().result
}

// ─── Ping ───

#[test]
fn test_ping() {
    let app = setup();
    assert_eq!(call(&app, "ping", json!({})), json!({"pong": true}));
}

// ─── Unknown method ───

#[test]
fn test_unknown_method_returns_error() {
    let app = setup();
    let err = handle_method(&app, "nonexistent.method", &json!({})).unwrap_err();
    assert_eq!(err, "unknown method: nonexistent.method");
}

// ─── Router ───

#[test]
fn test_router_load_falls_back_to_default() {
    let app = setup();
    let res = call(&app, "router.load", json!({"fragment": "#gitlab"}));
    assert_eq!(res["active"], "gitlab");
    assert_eq!(res["fragment"], "#gitlab");

    let res = call(&app, "router.load", json!({"fragment": "#bogus"}));
    assert_eq!(res["active"], "overview");
}

#[test]
fn test_router_navigate_and_state() {
    let app = setup();
    let res = call(&app, "router.navigate", json!({"section": "unified"}));
    assert_eq!(res["active"], "unified");

    let sections = res["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 4);
    let active: Vec<&Value> = sections.iter().filter(|s| s["active"] == true).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["id"], "unified");

    let err = handle_method(&app, "router.navigate", &json!({"section": "nope"})).unwrap_err();
    assert_eq!(err, "Unknown section: nope");
    assert_eq!(call(&app, "router.state", json!({}))["active"], "unified");
}

#[test]
fn test_router_navigate_missing_section() {
    let app = setup();
    assert!(handle_method(&app, "router.navigate", &json!({})).is_err());
}

// ─── Forms ───

#[test]
fn test_identity_from_params() {
    assert_eq!(
        identity_from_params(&json!({"provider":"github","owner":" octocat ","repo":"hello-world"}))
            .unwrap(),
        Identity::github("octocat", "hello-world").unwrap()
    );
    assert_eq!(
        identity_from_params(&json!({"provider":"git","gitProvider":"gitlab","repository":"42"}))
            .unwrap(),
        Identity::unified("gitlab", "42").unwrap()
    );
    assert_eq!(
        identity_from_params(&json!({"provider":"gitlab","projectId":""})).unwrap_err(),
        "Please enter a project ID"
    );
    assert_eq!(
        identity_from_params(&json!({"provider":"bitbucket"})).unwrap_err(),
        "Unknown provider: bitbucket"
    );
}

#[test]
fn test_form_submit_validation_issues_no_fetch() {
    let app = setup();
    let err = handle_method(&app, "form.submit", &json!({"provider":"github","owner":"octocat"}))
        .unwrap_err();
    assert_eq!(err, "Please enter both owner and repository name");

    let state = call(&app, "view.state", json!({}));
    assert_eq!(state["containers"]["github-branches"]["status"], "idle");
}

#[test]
fn test_form_submit_returns_loading_containers() {
    let app = setup();
    let dispatch = handle_method(
        &app,
        "form.submit",
        &json!({"provider":"gitlab","projectId":"278964"}),
    )
    .unwrap();

    assert_eq!(dispatch.pending.len(), 3);
    let containers = dispatch.result["containers"].as_array().unwrap();
    let ids: Vec<&str> = containers
        .iter()
        .map(|c| c["container"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["gitlab-branches", "gitlab-commits", "gitlab-merges"]);
    assert!(containers.iter().all(|c| c["status"] == "loading"));
}

#[test]
fn test_filters_skipped_before_submit() {
    let app = setup();
    let res = call(&app, "filter.branch", json!({"provider":"github","branch":"main"}));
    assert_eq!(res, json!({"skipped": true}));
    let res = call(&app, "filter.state", json!({"provider":"github","state":"closed"}));
    assert_eq!(res, json!({"skipped": true}));
}

#[test]
fn test_filter_state_after_submit() {
    let app = setup();
    handle_method(
        &app,
        "form.submit",
        &json!({"provider":"github","owner":"octocat","repo":"hello-world"}),
    )
    .unwrap();

    let dispatch = handle_method(
        &app,
        "filter.state",
        &json!({"provider":"github","state":"closed"}),
    )
    .unwrap();
    assert_eq!(dispatch.result["skipped"], false);
    assert_eq!(dispatch.result["container"], "github-pulls");
    assert_eq!(
        dispatch.pending[0].request.path_and_query(),
        "/api/github/pull-requests?owner=octocat&repo=hello-world&state=closed"
    );
}

#[test]
fn test_form_placeholder() {
    let app = setup();
    assert_eq!(
        call(&app, "form.placeholder", json!({"gitProvider":"gitlab"}))["placeholder"],
        "project ID (e.g., 12345678)"
    );
    assert_eq!(
        call(&app, "form.placeholder", json!({"gitProvider":"github"}))["placeholder"],
        "owner/repo (e.g., octocat/hello-world)"
    );
}

#[test]
fn test_settings_get() {
    let app = setup();
    let res = call(&app, "settings.get", json!({}));
    assert_eq!(res["base_url"], "http://127.0.0.1:8080");
    assert_eq!(res["default_section"], "overview");
}

// ─── Render events ───

#[tokio::test]
async fn test_complete_fetch_emits_render_event() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/git/branches")
        .match_query(Matcher::UrlEncoded("provider".into(), "github".into()))
        .with_body(r#"[{"name":"main","commitSha":"abcdef123456"}]"#)
        .create_async()
        .await;

    let app = setup_with(&server.url());
    let dispatch = handle_method(
        &app,
        "form.submit",
        &json!({"provider":"unified","gitProvider":"github","repository":"octocat/hello-world"}),
    )
    .unwrap();
    let client = app.lock().unwrap().client.clone();
    let branches = dispatch.pending.into_iter().next().unwrap();

    let event = complete_fetch(&app, &client, branches).await.unwrap();
    assert_eq!(event["event"], "render");
    assert_eq!(event["container"], "unified-branches");
    assert_eq!(event["status"], "loaded");
    assert_eq!(event["branch_filter"]["select_id"], "unified-branch-filter");
    assert!(event["html"].as_str().unwrap().contains("abcdef1"));
}

#[tokio::test]
async fn test_superseded_fetch_emits_nothing() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/github/commits")
        .match_query(Matcher::Any)
        .with_body("[]")
        .expect_at_least(1)
        .create_async()
        .await;

    let app = setup_with(&server.url());
    let params = json!({"provider":"github","owner":"octocat","repo":"hello-world"});
    let first = handle_method(&app, "form.submit", &params).unwrap();
    handle_method(&app, "form.submit", &params).unwrap();

    let client = app.lock().unwrap().client.clone();
    let stale_commits = first.pending.into_iter().nth(1).unwrap();
    assert!(complete_fetch(&app, &client, stale_commits).await.is_none());
}

// ─── Call ordering ───

#[test]
fn test_dispatch_call_replies_before_starting_fetches() {
    let app = setup();
    let log = std::cell::RefCell::new(Vec::new());

    dispatch_call(
        &app,
        "form.submit",
        &json!({"provider":"github","owner":"octocat","repo":"hello-world"}),
        |reply| {
            assert!(reply.is_ok());
            log.borrow_mut().push("reply".to_string());
        },
        |pending| log.borrow_mut().push(pending.container().dom_id()),
    );

    assert_eq!(
        log.into_inner(),
        vec!["reply", "github-branches", "github-commits", "github-pulls"]
    );
}

#[test]
fn test_dispatch_call_error_starts_nothing() {
    let app = setup();
    let mut replies = Vec::new();
    let mut started = 0;

    dispatch_call(
        &app,
        "form.submit",
        &json!({"provider":"gitlab","projectId":" "}),
        |reply| replies.push(reply),
        |_| started += 1,
    );

    assert_eq!(replies, vec![Err("Please enter a project ID".to_string())]);
    assert_eq!(started, 0);
}

// ─── Logging ───

#[test]
fn test_log_preview_cuts_on_char_boundary() {
    // The 'é' straddles byte 200 of the message.
    let repo = format!("{}é-repo", "r".repeat(112));
    let body = json!({
        "id": 1,
        "method": "form.submit",
        "params": {"provider": "github", "owner": "octocat", "repo": repo},
    })
    .to_string();
    assert!(body.len() > LOG_PREVIEW_CHARS);
    assert!(!body.is_char_boundary(LOG_PREVIEW_CHARS));

    let preview = log_preview(&body);
    assert_eq!(preview.chars().count(), LOG_PREVIEW_CHARS);
    assert!(body.starts_with(&preview));
    assert_eq!(log_preview("short"), "short");
}

// ─── Poisoned state ───

#[tokio::test]
async fn test_complete_fetch_on_poisoned_state_returns_none() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let app = setup_with(&format!("http://127.0.0.1:{}", port));
    let dispatch = handle_method(&app, "form.submit", &json!({"provider":"gitlab","projectId":"42"}))
        .unwrap();
    let client = app.lock().unwrap().client.clone();

    let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = app.lock().unwrap();
        panic!("poison the app state");
    }));
    assert!(app.is_poisoned());

    let pending = dispatch.pending.into_iter().next().unwrap();
    assert!(complete_fetch(&app, &client, pending).await.is_none());
}
