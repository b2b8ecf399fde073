use chrono::{DateTime, Utc};

/// Why a pull request shows up in the digest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Involvement {
    Authored,
    Reviewing,
    Mentioned,
}

impl Involvement {
    /// Precedence order: a PR is kept only in the first category it appears in
    pub const ALL: [Involvement; 3] = [
        Involvement::Authored,
        Involvement::Reviewing,
        Involvement::Mentioned,
    ];

    /// Section heading
    pub fn label(self) -> &'static str {
        match self {
            Involvement::Authored => "My PRs",
            Involvement::Reviewing => "Reviewing",
            Involvement::Mentioned => "Mentioned",
        }
    }

    /// GitHub search query for open PRs in this category
    pub fn query(self, username: &str) -> String {
        let qualifier = match self {
            Involvement::Authored => "author",
            Involvement::Reviewing => "review-requested",
            Involvement::Mentioned => "mentions",
        };
        format!("is:pr is:open {}:{}", qualifier, username)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Search API id, stable across the three queries
    pub id: u64,
    pub repo: String, // "owner/repo" format
    pub title: String,
    pub number: u64,
    pub age_days: i64,
    pub url: String,
}

/// Open PRs split by involvement. A PR id appears in at most one list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedPullRequests {
    pub authored: Vec<PullRequest>,
    pub reviewing: Vec<PullRequest>,
    pub mentioned: Vec<PullRequest>,
}

impl GroupedPullRequests {
    pub fn get(&self, involvement: Involvement) -> &[PullRequest] {
        match involvement {
            Involvement::Authored => &self.authored,
            Involvement::Reviewing => &self.reviewing,
            Involvement::Mentioned => &self.mentioned,
        }
    }

    /// Non-empty categories in precedence order
    pub fn sections(&self) -> impl Iterator<Item = (Involvement, &[PullRequest])> + '_ {
        Involvement::ALL
            .into_iter()
            .map(move |involvement| (involvement, self.get(involvement)))
            .filter(|(_, prs)| !prs.is_empty())
    }

    pub fn total(&self) -> usize {
        self.authored.len() + self.reviewing.len() + self.mentioned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRun {
    pub repo: String,
    pub workflow_name: String,
    pub branch: String,
    pub failed_at: DateTime<Utc>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleBranch {
    pub repo: String,
    pub branch: String,
    pub age_days: i64,
    /// Git author name of the head commit (not the linked login)
    pub last_commit_author: String,
}
