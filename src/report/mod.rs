mod assemble;
mod render;
mod storage;

pub use assemble::{assemble_report, generate_report, ReportScope};
pub use render::render_report;
pub use storage::{report_file_name, save_report};

use chrono::{DateTime, Duration, Utc};

use crate::collect::{FailedRun, GroupedPullRequests, StaleBranch};

/// One run of the digest. Built once by [`assemble_report`], then rendered.
#[derive(Debug, Clone)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub username: String,
    pub pull_requests: GroupedPullRequests,
    pub failed_runs: Vec<FailedRun>,
    pub stale_branches: Vec<StaleBranch>,
    /// One message per section that could not be collected
    pub errors: Vec<String>,
    pub failed_run_window: Duration,
    pub stale_after: Duration,
}

/// Section counts shown in the summary table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub open_prs: usize,
    pub failed_runs: usize,
    pub stale_branches: usize,
}

impl Report {
    pub fn summary(&self) -> Summary {
        Summary {
            open_prs: self.pull_requests.total(),
            failed_runs: self.failed_runs.len(),
            stale_branches: self.stale_branches.len(),
        }
    }

    /// True when at least one section failed and was left empty
    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty()
    }
}
