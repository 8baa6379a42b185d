use serde::{Deserialize, Serialize};

/// A branch as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    /// Full hash of the latest commit on the branch.
    pub commit_sha: String,
}

/// A single commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// Full commit hash.
    pub sha: String,
    pub author: String,
    /// ISO-8601 timestamp.
    pub timestamp: String,
    pub message: String,
}

/// A GitHub pull request or GitLab merge request.
///
/// `state` is kept as the backend's raw string: GitHub reports `open`, GitLab
/// reports `opened`, and the unified endpoints pass through whichever one the
/// backend picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub state: String,
    /// ISO-8601 timestamp.
    pub created_at: String,
    pub source_branch: String,
    pub target_branch: String,
}
