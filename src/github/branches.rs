use octocrab::Octocrab;

use crate::github::types::{Branch, CommitDetail, PageParams};

/// Branches are listed from the first page only
pub const BRANCHES_PAGE_SIZE: u8 = 100;

/// First page of branches for `repo` ("owner/name"), in provider order
pub async fn list_branches(client: &Octocrab, repo: &str) -> octocrab::Result<Vec<Branch>> {
    client
        .get(
            format!("/repos/{}/branches", repo),
            Some(&PageParams::first(BRANCHES_PAGE_SIZE)),
        )
        .await
}

/// Full commit detail, including the linked author account and committer date
pub async fn get_commit(
    client: &Octocrab,
    repo: &str,
    sha: &str,
) -> octocrab::Result<CommitDetail> {
    client
        .get(format!("/repos/{}/commits/{}", repo, sha), None::<&()>)
        .await
}
