//! Unit tests for `ProviderDataClient` against a mock backend.

use mockito::Matcher;

use gitpanel::services::provider_client::ProviderDataClient;
use gitpanel::types::errors::FetchError;
use gitpanel::types::provider::Identity;
use gitpanel::types::settings::ClientSettings;

fn client_for(base_url: &str) -> ProviderDataClient {
    let settings = ClientSettings {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..ClientSettings::default()
    };
    ProviderDataClient::new(&settings).expect("client")
}

fn octocat() -> Identity {
    Identity::github("octocat", "hello-world").unwrap()
}

// ─── Success ───

#[tokio::test]
async fn test_fetch_branches_decodes_records() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/github/branches")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("owner".into(), "octocat".into()),
            Matcher::UrlEncoded("repo".into(), "hello-world".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"name":"main","commitSha":"7fd1a60b01f91b314f59955a4e4d4e80d8edf11d"}]"#)
        .create_async()
        .await;

    let branches = client_for(&server.url())
        .fetch_branches(&octocat())
        .await
        .unwrap();

    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].name, "main");
    assert_eq!(branches[0].commit_sha, "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_merge_requests_uses_gitlab_endpoint_and_default_state() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/gitlab/merge-requests")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("projectId".into(), "278964".into()),
            Matcher::UrlEncoded("state".into(), "opened".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"[{"number":12,"title":"Add CI","author":"alice","state":"opened",
                "createdAt":"2024-03-01T10:00:00Z","sourceBranch":"ci","targetBranch":"main"}]"#,
        )
        .create_async()
        .await;

    let identity = Identity::gitlab("278964").unwrap();
    let mrs = client_for(&server.url())
        .fetch_pull_requests(&identity, None)
        .await
        .unwrap();

    assert_eq!(mrs.len(), 1);
    assert_eq!(mrs[0].number, 12);
    assert_eq!(mrs[0].source_branch, "ci");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_values_are_encoded_exactly_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/git/commits")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("provider".into(), "gitlab".into()),
            Matcher::UrlEncoded("repository".into(), "group/sub project".into()),
            Matcher::UrlEncoded("branch".into(), "feature/a&b#c".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let identity = Identity::unified("gitlab", "group/sub project").unwrap();
    let commits = client_for(&server.url())
        .fetch_commits(&identity, Some("feature/a&b#c"))
        .await
        .unwrap();

    assert!(commits.is_empty());
    mock.assert_async().await;
}

// ─── Failures ───

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/github/branches")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"error":"repo not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server.url())
        .fetch_branches(&octocat())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "repo not found");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_empty_error_body_uses_default_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/github/commits")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let err = client_for(&server.url())
        .fetch_commits(&octocat(), None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FetchError::Server {
            status: 500,
            message: "Failed to fetch GitHub commits".to_string(),
        }
    );
}

#[tokio::test]
async fn test_message_field_used_for_non_success() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/gitlab/branches")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"401 Unauthorized"}"#)
        .create_async()
        .await;

    let err = client_for(&server.url())
        .fetch_branches(&Identity::gitlab("1").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "401 Unauthorized");
}

#[tokio::test]
async fn test_undecodable_success_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/github/pull-requests")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = client_for(&server.url())
        .fetch_pull_requests(&octocat(), Some("closed"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Reserve a port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = client_for(&format!("http://127.0.0.1:{}", port))
        .fetch_branches(&octocat())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(err.status(), None);
}
