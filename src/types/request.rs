use serde::{Deserialize, Serialize};

use crate::types::provider::{Identity, Provider, ResourceKind};

/// One GET against the backend: which resource, for which repository, with
/// which optional filter (branch for commits, state for pull requests).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub kind: ResourceKind,
    pub identity: Identity,
    pub filter: Option<String>,
}

impl ResourceRequest {
    pub fn branches(identity: Identity) -> Self {
        Self {
            kind: ResourceKind::Branches,
            identity,
            filter: None,
        }
    }

    /// A blank branch means "server default branch" and is left out of the query.
    pub fn commits(identity: Identity, branch: Option<&str>) -> Self {
        Self {
            kind: ResourceKind::Commits,
            identity,
            filter: non_blank(branch),
        }
    }

    /// A blank state falls back to the provider's default (`open` / `opened`).
    pub fn pull_requests(identity: Identity, state: Option<&str>) -> Self {
        let state = non_blank(state)
            .unwrap_or_else(|| identity.provider().default_pr_state().to_string());
        Self {
            kind: ResourceKind::PullRequests,
            identity,
            filter: Some(state),
        }
    }

    pub fn provider(&self) -> Provider {
        self.identity.provider()
    }

    /// Absolute path plus query string, every value percent-encoded once.
    pub fn path_and_query(&self) -> String {
        let provider = self.provider();
        let mut pairs = self.identity.query_pairs();
        match (self.kind, self.filter.as_deref()) {
            (ResourceKind::Commits, Some(branch)) => pairs.push(("branch", branch)),
            (ResourceKind::PullRequests, Some(state)) => pairs.push(("state", state)),
            _ => {}
        }

        let query = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "/api/{}/{}?{}",
            provider.api_segment(),
            self.kind.endpoint(provider),
            query
        )
    }

    pub fn default_error_message(&self) -> String {
        self.kind.default_error_message(self.provider())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
