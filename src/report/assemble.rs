use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use tracing::{info, warn};

use crate::collect::{collect_failed_runs, collect_pull_requests, collect_stale_branches};
use crate::config::Thresholds;
use crate::report::{render_report, Report};

/// Which repositories each per-repository section looks at
#[derive(Debug, Clone, Copy)]
pub struct ReportScope<'a> {
    /// Checked for stale branches
    pub repos: &'a [String],
    /// Checked for failed workflow runs
    pub run_repos: &'a [String],
}

/// Collect all three sections against a single `now`.
///
/// Sections are collected concurrently. A section that fails is left empty
/// and its error is recorded on the report; the others are unaffected.
pub async fn assemble_report(
    client: &Octocrab,
    username: &str,
    scope: ReportScope<'_>,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> Report {
    let (pull_requests, failed_runs, stale_branches) = tokio::join!(
        collect_pull_requests(client, username, now),
        collect_failed_runs(client, scope.run_repos, thresholds.failed_run_window, now),
        collect_stale_branches(
            client,
            username,
            scope.repos,
            &thresholds.excluded_branches,
            thresholds.stale_after,
            now,
        ),
    );

    let mut errors = Vec::new();
    let pull_requests = match pull_requests {
        Ok(grouped) => grouped,
        Err(e) => {
            warn!(error = %e, "pull request section failed");
            errors.push(format!("Failed to fetch PRs: {:#}", e));
            Default::default()
        }
    };

    info!(
        prs = pull_requests.total(),
        failed_runs = failed_runs.len(),
        stale_branches = stale_branches.len(),
        "report collected"
    );

    Report {
        generated_at: now,
        username: username.to_string(),
        pull_requests,
        failed_runs,
        stale_branches,
        errors,
        failed_run_window: thresholds.failed_run_window,
        stale_after: thresholds.stale_after,
    }
}

/// Assemble and render in one step. Returns the markdown text and the
/// section errors so the caller decides how to flag a partial report.
pub async fn generate_report(
    client: &Octocrab,
    username: &str,
    scope: ReportScope<'_>,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> (String, Vec<String>) {
    let report = assemble_report(client, username, scope, thresholds, now).await;
    let content = render_report(&report);
    (content, report.errors)
}
