use octocrab::Octocrab;

use crate::github::types::{PageParams, WorkflowRun, WorkflowRuns};

/// Number of most recent runs inspected per repository
pub const RUNS_PAGE_SIZE: u8 = 20;

/// Most recent workflow runs for `repo` ("owner/name")
pub async fn list_workflow_runs(
    client: &Octocrab,
    repo: &str,
) -> octocrab::Result<Vec<WorkflowRun>> {
    let runs: WorkflowRuns = client
        .get(
            format!("/repos/{}/actions/runs", repo),
            Some(&PageParams::first(RUNS_PAGE_SIZE)),
        )
        .await?;
    Ok(runs.workflow_runs)
}
