//! Collectors for the three digest sections.
//!
//! Each collector takes an explicit `now` so a whole report is evaluated
//! against one instant. The failed-run and stale-branch collectors query
//! repositories concurrently but never fail as a whole: a repository that
//! errors is logged and contributes nothing.

pub mod branches;
pub mod prs;
pub mod runs;
pub mod types;

pub use branches::collect_stale_branches;
pub use prs::{collect_pull_requests, group_pull_requests};
pub use runs::collect_failed_runs;
pub use types::{FailedRun, GroupedPullRequests, Involvement, PullRequest, StaleBranch};

/// Repositories queried at the same time by the per-repository collectors
pub(crate) const MAX_CONCURRENT_REPOS: usize = 8;
