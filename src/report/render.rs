use chrono::Local;
use std::fmt::Write;

use crate::collect::{FailedRun, PullRequest, StaleBranch};
use crate::report::Report;
use crate::time::{format_span, relative_time};

/// Render the report as markdown.
///
/// Output depends only on the report, so rendering the same report twice
/// gives identical text. Relative times are measured from `generated_at`.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let local = report.generated_at.with_timezone(&Local);
    let date = local.format("%Y-%m-%d");
    let window = format_span(report.failed_run_window);
    let threshold = format_span(report.stale_after);
    let summary = report.summary();

    let _ = writeln!(out, "# DevOps Digest - {}", date);
    out.push('\n');
    let _ = writeln!(out, "**Generated:** {} at {}", date, local.format("%H:%M:%S"));
    let _ = writeln!(out, "**User:** {}", report.username);
    out.push('\n');

    out.push_str("## Summary\n\n");
    out.push_str("| Metric | Count |\n");
    out.push_str("|--------|-------|\n");
    let _ = writeln!(out, "| Open PRs | {} |", summary.open_prs);
    let _ = writeln!(out, "| Failed Runs (Last {}) | {} |", window, summary.failed_runs);
    let _ = writeln!(out, "| Stale Branches ({}+) | {} |", threshold, summary.stale_branches);
    out.push('\n');

    out.push_str("## Pull Requests\n\n");
    if report.pull_requests.is_empty() {
        out.push_str("*No open pull requests.*\n\n");
    } else {
        for (involvement, prs) in report.pull_requests.sections() {
            let _ = writeln!(out, "### {}", involvement.label());
            out.push('\n');
            render_pr_table(&mut out, prs);
        }
    }

    let _ = writeln!(out, "## Failed Runs (Last {})", window);
    out.push('\n');
    if report.failed_runs.is_empty() {
        let _ = writeln!(out, "*No failed runs in the last {}.*", window.to_lowercase());
        out.push('\n');
    } else {
        render_failed_runs_table(&mut out, &report.failed_runs, report);
    }

    let _ = writeln!(out, "## Stale Branches ({}+)", threshold);
    out.push('\n');
    if report.stale_branches.is_empty() {
        out.push_str("*No stale branches found.*\n\n");
    } else {
        render_stale_branches_table(&mut out, &report.stale_branches);
    }

    if !report.errors.is_empty() {
        out.push_str("## Errors\n\n");
        for error in &report.errors {
            let _ = writeln!(out, "- ⚠️ {}", error);
        }
        out.push('\n');
    }

    out.push_str("---\n");
    out.push_str("*Report generated by DevOps Digest*");
    out
}

fn render_pr_table(out: &mut String, prs: &[PullRequest]) {
    out.push_str("| Repository | PR | Age |\n");
    out.push_str("|------------|-----|-----|\n");
    for pr in prs {
        let _ = writeln!(
            out,
            "| {} | [#{} {}]({}) | {} days |",
            cell(&pr.repo),
            pr.number,
            cell(&pr.title),
            pr.url,
            pr.age_days
        );
    }
    out.push('\n');
}

fn render_failed_runs_table(out: &mut String, runs: &[FailedRun], report: &Report) {
    out.push_str("| Repository | Workflow | Branch | Failed |\n");
    out.push_str("|------------|----------|--------|--------|\n");
    for run in runs {
        let _ = writeln!(
            out,
            "| {} | [{}]({}) | {} | {} |",
            cell(&run.repo),
            cell(&run.workflow_name),
            run.url,
            cell(&run.branch),
            relative_time(run.failed_at, report.generated_at)
        );
    }
    out.push('\n');
}

fn render_stale_branches_table(out: &mut String, branches: &[StaleBranch]) {
    out.push_str("| Repository | Branch | Age | Last Commit By |\n");
    out.push_str("|------------|--------|-----|----------------|\n");
    for branch in branches {
        let _ = writeln!(
            out,
            "| {} | {} | {} days | {} |",
            cell(&branch.repo),
            cell(&branch.branch),
            branch.age_days,
            cell(&branch.last_commit_author)
        );
    }
    out.push('\n');
}

/// Keep free text from breaking table columns
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::{group_pull_requests, GroupedPullRequests};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn pr(id: u64, age_days: i64) -> PullRequest {
        PullRequest {
            id,
            repo: "org/a".to_string(),
            title: format!("Change {}", id),
            number: id,
            age_days,
            url: format!("https://github.com/org/a/pull/{}", id),
        }
    }

    fn empty_report() -> Report {
        Report {
            generated_at: now(),
            username: "bob".to_string(),
            pull_requests: GroupedPullRequests::default(),
            failed_runs: vec![],
            stale_branches: vec![],
            errors: vec![],
            failed_run_window: Duration::hours(12),
            stale_after: Duration::days(30),
        }
    }

    fn full_report() -> Report {
        Report {
            pull_requests: group_pull_requests(vec![pr(1, 10)], vec![pr(2, 4)], vec![pr(1, 10)]),
            failed_runs: vec![FailedRun {
                repo: "org/a".to_string(),
                workflow_name: "CI".to_string(),
                branch: "feature/x".to_string(),
                failed_at: now() - Duration::hours(3),
                url: "https://github.com/org/a/actions/runs/9".to_string(),
            }],
            stale_branches: vec![StaleBranch {
                repo: "org/b".to_string(),
                branch: "old-spike".to_string(),
                age_days: 45,
                last_commit_author: "Bob".to_string(),
            }],
            ..empty_report()
        }
    }

    #[test]
    fn test_empty_report_placeholders() {
        let text = render_report(&empty_report());
        assert!(text.contains("**User:** bob"));
        assert!(text.contains("| Open PRs | 0 |"));
        assert!(text.contains("*No open pull requests.*"));
        assert!(text.contains("*No failed runs in the last 12 hours.*"));
        assert!(text.contains("*No stale branches found.*"));
        assert!(!text.contains("## Errors"));
        assert!(!text.contains("### My PRs"));
        assert!(text.ends_with("*Report generated by DevOps Digest*"));
    }

    #[test]
    fn test_sections_in_order() {
        let text = render_report(&full_report());
        let order = [
            "# DevOps Digest - ",
            "## Summary",
            "## Pull Requests",
            "### My PRs",
            "### Reviewing",
            "## Failed Runs (Last 12 Hours)",
            "## Stale Branches (30 Days+)",
        ];
        let positions: Vec<usize> = order.iter().map(|h| text.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!text.contains("### Mentioned"));
        assert!(!text.contains("*No open pull requests.*"));
    }

    #[test]
    fn test_summary_counts() {
        let text = render_report(&full_report());
        assert!(text.contains("| Open PRs | 2 |"));
        assert!(text.contains("| Failed Runs (Last 12 Hours) | 1 |"));
        assert!(text.contains("| Stale Branches (30 Days+) | 1 |"));
    }

    #[test]
    fn test_rows() {
        let text = render_report(&full_report());
        assert!(text.contains("| org/a | [#1 Change 1](https://github.com/org/a/pull/1) | 10 days |"));
        assert!(text.contains(
            "| org/a | [CI](https://github.com/org/a/actions/runs/9) | feature/x | 3 hours ago |"
        ));
        assert!(text.contains("| org/b | old-spike | 45 days | Bob |"));
    }

    #[test]
    fn test_errors_section() {
        let report = Report {
            errors: vec!["Failed to fetch PRs: boom".to_string()],
            ..empty_report()
        };
        let text = render_report(&report);
        assert!(text.contains("## Errors\n\n- ⚠️ Failed to fetch PRs: boom\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let report = full_report();
        assert_eq!(render_report(&report), render_report(&report));
    }

    #[test]
    fn test_pipes_in_titles_are_escaped() {
        let mut report = empty_report();
        let mut p = pr(3, 1);
        p.title = "a | b".to_string();
        report.pull_requests.authored.push(p);
        let text = render_report(&report);
        assert!(text.contains("[#3 a \\| b]"));
    }
}
