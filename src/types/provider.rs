use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::errors::FormError;

/// Hosting family a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    GitHub,
    GitLab,
    /// Provider-agnostic endpoints that dispatch to either host.
    Unified,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::GitHub, Provider::GitLab, Provider::Unified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::GitHub => "github",
            Provider::GitLab => "gitlab",
            Provider::Unified => "unified",
        }
    }

    /// Path segment under `/api/`.
    pub fn api_segment(&self) -> &'static str {
        match self {
            Provider::GitHub => "github",
            Provider::GitLab => "gitlab",
            Provider::Unified => "git",
        }
    }

    /// Brand name used in user-facing messages; the unified family has none.
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            Provider::GitHub => Some("GitHub"),
            Provider::GitLab => Some("GitLab"),
            Provider::Unified => None,
        }
    }

    /// State filter applied when the caller does not pick one.
    pub fn default_pr_state(&self) -> &'static str {
        match self {
            Provider::GitLab => "opened",
            Provider::GitHub | Provider::Unified => "open",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(Provider::GitHub),
            "gitlab" => Ok(Provider::GitLab),
            "unified" | "git" => Ok(Provider::Unified),
            other => Err(FormError::UnknownProvider(other.to_string())),
        }
    }
}

/// The three resource kinds every provider exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Branches,
    Commits,
    PullRequests,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Branches,
        ResourceKind::Commits,
        ResourceKind::PullRequests,
    ];

    /// Endpoint name; GitLab calls pull requests merge requests.
    pub fn endpoint(&self, provider: Provider) -> &'static str {
        match (self, provider) {
            (ResourceKind::Branches, _) => "branches",
            (ResourceKind::Commits, _) => "commits",
            (ResourceKind::PullRequests, Provider::GitLab) => "merge-requests",
            (ResourceKind::PullRequests, _) => "pull-requests",
        }
    }

    /// Plural noun used in messages.
    pub fn label(&self, provider: Provider) -> &'static str {
        match (self, provider) {
            (ResourceKind::Branches, _) => "branches",
            (ResourceKind::Commits, _) => "commits",
            (ResourceKind::PullRequests, Provider::GitLab) => "merge requests",
            (ResourceKind::PullRequests, _) => "pull requests",
        }
    }

    /// Generic failure text used when the backend gives no usable error body.
    pub fn default_error_message(&self, provider: Provider) -> String {
        match provider.display_name() {
            Some(name) => format!("Failed to fetch {} {}", name, self.label(provider)),
            None => format!("Failed to fetch {}", self.label(provider)),
        }
    }
}

/// Provider-specific addressing of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum Identity {
    GitHub {
        owner: String,
        repo: String,
    },
    GitLab {
        #[serde(rename = "projectId")]
        project_id: String,
    },
    Unified {
        /// Upstream host the unified backend should talk to (`github` or `gitlab`).
        #[serde(rename = "gitProvider")]
        git_provider: String,
        repository: String,
    },
}

impl Identity {
    pub fn github(owner: &str, repo: &str) -> Result<Self, FormError> {
        let (owner, repo) = (owner.trim(), repo.trim());
        if owner.is_empty() || repo.is_empty() {
            return Err(FormError::MissingFields(
                "Please enter both owner and repository name".to_string(),
            ));
        }
        Ok(Identity::GitHub {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn gitlab(project_id: &str) -> Result<Self, FormError> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(FormError::MissingFields("Please enter a project ID".to_string()));
        }
        Ok(Identity::GitLab {
            project_id: project_id.to_string(),
        })
    }

    pub fn unified(git_provider: &str, repository: &str) -> Result<Self, FormError> {
        let (git_provider, repository) = (git_provider.trim(), repository.trim());
        if git_provider.is_empty() || repository.is_empty() {
            return Err(FormError::MissingFields(
                "Please enter both provider and repository".to_string(),
            ));
        }
        Ok(Identity::Unified {
            git_provider: git_provider.to_string(),
            repository: repository.to_string(),
        })
    }

    pub fn provider(&self) -> Provider {
        match self {
            Identity::GitHub { .. } => Provider::GitHub,
            Identity::GitLab { .. } => Provider::GitLab,
            Identity::Unified { .. } => Provider::Unified,
        }
    }

    /// Raw (unencoded) query pairs that address the repository.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        match self {
            Identity::GitHub { owner, repo } => vec![("owner", owner.as_str()), ("repo", repo.as_str())],
            Identity::GitLab { project_id } => vec![("projectId", project_id.as_str())],
            Identity::Unified {
                git_provider,
                repository,
            } => vec![
                ("provider", git_provider.as_str()),
                ("repository", repository.as_str()),
            ],
        }
    }
}

/// Placeholder hint for the unified form's repository field.
pub fn repository_placeholder(git_provider: &str) -> &'static str {
    match git_provider.trim().to_ascii_lowercase().as_str() {
        "gitlab" => "project ID (e.g., 12345678)",
        _ => "owner/repo (e.g., octocat/hello-world)",
    }
}
