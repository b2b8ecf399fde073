//! Wire types for the handful of REST responses we read.
//!
//! Only the fields the collectors use are declared; serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
}

/// `GET /search/issues` response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub repository_url: String,
    pub created_at: DateTime<Utc>,
}

impl SearchItem {
    /// "owner/repo" taken from the API repository URL
    /// (e.g. "https://api.github.com/repos/owner/repo").
    pub fn repo_name(&self) -> String {
        self.repository_url
            .split_once("/repos/")
            .map(|(_, repo)| repo.trim_end_matches('/').to_string())
            .unwrap_or_else(|| "unknown/unknown".to_string())
    }
}

/// `GET /repos/{repo}/actions/runs` response
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRuns {
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRun {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub head_branch: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: BranchCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchCommit {
    pub sha: String,
}

/// `GET /repos/{repo}/commits/{sha}` response
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    /// Linked GitHub account; null when the commit email maps to no user
    #[serde(default)]
    pub author: Option<LinkedAccount>,
    pub commit: GitCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedAccount {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitCommit {
    #[serde(default)]
    pub author: Option<GitSignature>,
    #[serde(default)]
    pub committer: Option<GitSignature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitSignature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Query string for list endpoints
#[derive(Debug, Serialize)]
pub(crate) struct PageParams {
    pub per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl PageParams {
    pub fn first(per_page: u8) -> Self {
        Self {
            per_page,
            page: None,
        }
    }

    pub fn page(per_page: u8, page: u32) -> Self {
        Self {
            per_page,
            page: Some(page),
        }
    }
}
