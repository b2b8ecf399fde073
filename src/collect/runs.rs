use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt};
use octocrab::Octocrab;
use tracing::{debug, warn};

use crate::collect::types::FailedRun;
use crate::collect::MAX_CONCURRENT_REPOS;
use crate::github::actions::list_workflow_runs;
use crate::github::is_not_found;
use crate::github::types::WorkflowRun;

/// Failed workflow runs updated within `window` before `now`, most recent first.
///
/// Repositories without Actions (404) or that fail for any other reason are
/// skipped.
pub async fn collect_failed_runs(
    client: &Octocrab,
    repos: &[String],
    window: Duration,
    now: DateTime<Utc>,
) -> Vec<FailedRun> {
    let per_repo: Vec<Vec<FailedRun>> = stream::iter(repos)
        .map(|repo| async move {
            match list_workflow_runs(client, repo).await {
                Ok(runs) => select_failed_runs(repo, runs, window, now),
                Err(e) if is_not_found(&e) => {
                    debug!(repo = %repo, "no workflow runs available, skipping");
                    Vec::new()
                }
                Err(e) => {
                    warn!(repo = %repo, error = %e, "failed to list workflow runs, skipping");
                    Vec::new()
                }
            }
        })
        .buffered(MAX_CONCURRENT_REPOS)
        .collect()
        .await;

    let mut failed: Vec<FailedRun> = per_repo.into_iter().flatten().collect();
    failed.sort_by(|a, b| b.failed_at.cmp(&a.failed_at));
    failed
}

/// Keep runs that concluded in failure and were last updated no earlier than
/// `now - window`. A window reaching past the earliest representable time
/// covers every run.
pub fn select_failed_runs(
    repo: &str,
    runs: Vec<WorkflowRun>,
    window: Duration,
    now: DateTime<Utc>,
) -> Vec<FailedRun> {
    let cutoff = now
        .checked_sub_signed(window)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    runs.into_iter()
        .filter(|run| run.conclusion.as_deref() == Some("failure"))
        .filter(|run| run.updated_at >= cutoff)
        .map(|run| FailedRun {
            repo: repo.to_string(),
            workflow_name: run.name.unwrap_or_default(),
            branch: run.head_branch.unwrap_or_default(),
            failed_at: run.updated_at,
            url: run.html_url,
        })
        .collect()
}
