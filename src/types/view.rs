use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::provider::{Identity, Provider, ResourceKind};

/// One result container of the page: a (provider, resource kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId {
    pub provider: Provider,
    pub kind: ResourceKind,
}

impl ContainerId {
    pub fn new(provider: Provider, kind: ResourceKind) -> Self {
        Self { provider, kind }
    }

    /// All three containers owned by one provider's form.
    pub fn for_provider(provider: Provider) -> [ContainerId; 3] {
        ResourceKind::ALL.map(|kind| ContainerId::new(provider, kind))
    }

    /// Element id of the container in the page, e.g. `github-pulls` or `gitlab-merges`.
    pub fn dom_id(&self) -> String {
        let suffix = match (self.kind, self.provider) {
            (ResourceKind::Branches, _) => "branches",
            (ResourceKind::Commits, _) => "commits",
            (ResourceKind::PullRequests, Provider::GitHub) => "pulls",
            (ResourceKind::PullRequests, Provider::GitLab) => "merges",
            (ResourceKind::PullRequests, Provider::Unified) => "pr",
        };
        format!("{}-{}", self.provider.as_str(), suffix)
    }
}

/// Element id of a provider's branch filter dropdown.
pub fn branch_filter_id(provider: Provider) -> String {
    format!("{}-branch-filter", provider.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// What a container currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerView {
    pub status: ContainerStatus,
    pub html: String,
}

/// Transient form-field state of one provider's form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Last identity submitted; reused by the filter controls.
    pub identity: Option<Identity>,
    /// Selected branch filter; `None` means the server's default branch.
    pub branch: Option<String>,
    /// Selected pull/merge request state filter.
    pub state: String,
    /// Branch names offered by the branch filter dropdown.
    pub branch_options: Vec<String>,
}

impl FormState {
    pub fn new(provider: Provider) -> Self {
        Self {
            identity: None,
            branch: None,
            state: provider.default_pr_state().to_string(),
            branch_options: Vec::new(),
        }
    }
}

/// Navigation control state of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub id: String,
    pub active: bool,
}

/// Snapshot of everything the page displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub active_section: String,
    pub fragment: String,
    pub nav: Vec<NavEntry>,
    pub forms: BTreeMap<Provider, FormState>,
    /// Keyed by container element id.
    pub containers: BTreeMap<String, ContainerView>,
}

/// Replacement options for a branch filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchFilterUpdate {
    pub select_id: String,
    pub options_html: String,
}

/// Markup to write into one container once its fetch has settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerUpdate {
    pub container: String,
    pub status: ContainerStatus,
    pub html: String,
    pub sequence: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_filter: Option<BranchFilterUpdate>,
}
