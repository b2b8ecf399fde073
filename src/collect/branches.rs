use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt};
use octocrab::Octocrab;
use std::cmp::Reverse;
use tracing::{debug, warn};

use crate::collect::types::StaleBranch;
use crate::collect::MAX_CONCURRENT_REPOS;
use crate::github::branches::{get_commit, list_branches};
use crate::github::is_not_found;
use crate::github::types::CommitDetail;
use crate::time::age_in_days;

/// Only this many branches (in provider order) are inspected per repository.
/// Each one costs a commit lookup, so repositories with many branches are
/// knowingly under-reported.
pub const MAX_BRANCHES_CHECKED: usize = 20;

/// Branches whose head commit is by `username` and older than `stale_after`,
/// oldest first.
///
/// A repository whose branch listing fails is skipped; a branch whose commit
/// lookup fails is skipped. Neither is reported to the caller.
pub async fn collect_stale_branches(
    client: &Octocrab,
    username: &str,
    repos: &[String],
    excluded: &[String],
    stale_after: Duration,
    now: DateTime<Utc>,
) -> Vec<StaleBranch> {
    let per_repo: Vec<Vec<StaleBranch>> = stream::iter(repos)
        .map(|repo| scan_repo(client, repo, username, excluded, stale_after, now))
        .buffered(MAX_CONCURRENT_REPOS)
        .collect()
        .await;

    let mut stale: Vec<StaleBranch> = per_repo.into_iter().flatten().collect();
    stale.sort_by_key(|b| Reverse(b.age_days));
    stale
}

async fn scan_repo(
    client: &Octocrab,
    repo: &str,
    username: &str,
    excluded: &[String],
    stale_after: Duration,
    now: DateTime<Utc>,
) -> Vec<StaleBranch> {
    let branches = match list_branches(client, repo).await {
        Ok(branches) => branches,
        Err(e) if is_not_found(&e) => {
            debug!(repo, "branches not available, skipping");
            return Vec::new();
        }
        Err(e) => {
            warn!(repo, error = %e, "failed to list branches, skipping");
            return Vec::new();
        }
    };

    let mut stale = Vec::new();
    for branch in branches.into_iter().take(MAX_BRANCHES_CHECKED) {
        if excluded.iter().any(|name| *name == branch.name) {
            continue;
        }

        let commit = match get_commit(client, repo, &branch.commit.sha).await {
            Ok(commit) => commit,
            Err(e) => {
                debug!(repo, branch = %branch.name, error = %e, "commit lookup failed, skipping branch");
                continue;
            }
        };

        if let Some(found) = evaluate_branch(repo, &branch.name, &commit, username, stale_after, now) {
            stale.push(found);
        }
    }
    stale
}

/// Decide whether a branch head makes the branch stale for `username`.
///
/// Age comes from the committer date, which moves on rebase and amend while
/// the author date does not. The branch must be strictly older than
/// `stale_after`.
pub fn evaluate_branch(
    repo: &str,
    branch: &str,
    commit: &CommitDetail,
    username: &str,
    stale_after: Duration,
    now: DateTime<Utc>,
) -> Option<StaleBranch> {
    if !is_authored_by(commit, username) {
        return None;
    }

    let committed_at = commit.commit.committer.as_ref()?.date?;
    // A threshold past the earliest representable time makes nothing stale
    let cutoff = now.checked_sub_signed(stale_after)?;
    if committed_at >= cutoff {
        return None;
    }

    Some(StaleBranch {
        repo: repo.to_string(),
        branch: branch.to_string(),
        age_days: age_in_days(committed_at, now),
        last_commit_author: author_name(commit).to_string(),
    })
}

/// Case-insensitive match on either the linked login or the raw git author
/// name. Commits from emails with no linked account only carry the name.
pub fn is_authored_by(commit: &CommitDetail, username: &str) -> bool {
    let target = username.to_lowercase();
    let login_matches = commit
        .author
        .as_ref()
        .is_some_and(|account| account.login.to_lowercase() == target);
    login_matches || author_name(commit).to_lowercase() == target
}

fn author_name(commit: &CommitDetail) -> &str {
    commit
        .commit
        .author
        .as_ref()
        .map(|sig| sig.name.as_str())
        .unwrap_or("")
}
