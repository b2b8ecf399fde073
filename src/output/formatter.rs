use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::collect::{FailedRun, GroupedPullRequests, PullRequest, StaleBranch};
use crate::time::relative_time;

/// Width of section rules when stdout is not a terminal
const RULE_WIDTH: usize = 60;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Horizontal rule of `max` box-drawing characters, shortened to fit the terminal
pub fn rule(ch: char, max: usize) -> String {
    let width = get_terminal_width().map_or(max, |w| w.min(max));
    ch.to_string().repeat(width)
}

fn section_header(title: &str, count: usize, use_colors: bool) -> String {
    let line = rule('─', RULE_WIDTH);
    let heading = format!(" {} ({})", title, count);
    if use_colors {
        format!("\n{}\n{}\n{}", line.bright_black(), heading.cyan().bold(), line.bright_black())
    } else {
        format!("\n{}\n{}\n{}", line, heading, line)
    }
}

/// Format grouped PRs, one block per non-empty category
pub fn format_prs(grouped: &GroupedPullRequests, use_colors: bool) -> String {
    if grouped.is_empty() {
        return "No open PRs found.".to_string();
    }

    let mut blocks = Vec::new();
    for (involvement, prs) in grouped.sections() {
        blocks.push(section_header(involvement.label(), prs.len(), use_colors));
        blocks.extend(prs.iter().map(|pr| format_pr(pr, use_colors)));
    }
    blocks.join("\n")
}

fn format_pr(pr: &PullRequest, use_colors: bool) -> String {
    let age = format!("Age: {} days", pr.age_days);
    if use_colors {
        let age = if pr.age_days > 7 {
            age.red().to_string()
        } else if pr.age_days > 3 {
            age.yellow().to_string()
        } else {
            age.green().to_string()
        };
        format!(
            "\n  {}\n  #{} {}\n  {}\n  {}",
            pr.repo.bright_blue(),
            pr.number,
            pr.title,
            age,
            pr.url.bright_black()
        )
    } else {
        format!("\n  {}\n  #{} {}\n  {}\n  {}", pr.repo, pr.number, pr.title, age, pr.url)
    }
}

/// Format failed runs with their failure time relative to `now`
pub fn format_failed_runs(
    runs: &[FailedRun],
    window_label: &str,
    now: DateTime<Utc>,
    use_colors: bool,
) -> String {
    if runs.is_empty() {
        return format!("No failed runs in the last {}.", window_label.to_lowercase());
    }

    let mut blocks = vec![if use_colors {
        let line = rule('─', RULE_WIDTH);
        format!(
            "\n{}\n{}\n{}",
            line.bright_black(),
            format!(" Failed Runs ({})", runs.len()).red().bold(),
            line.bright_black()
        )
    } else {
        section_header("Failed Runs", runs.len(), false)
    }];

    for run in runs {
        let failed = format!("Failed: {}", relative_time(run.failed_at, now));
        blocks.push(if use_colors {
            format!(
                "\n  {}\n  {} on {}\n  {}\n  {}",
                run.repo.bright_blue(),
                run.workflow_name,
                run.branch,
                failed.red(),
                run.url.bright_black()
            )
        } else {
            format!(
                "\n  {}\n  {} on {}\n  {}\n  {}",
                run.repo, run.workflow_name, run.branch, failed, run.url
            )
        });
    }
    blocks.join("\n")
}

/// Format stale branches, oldest ones highlighted
pub fn format_stale_branches(
    branches: &[StaleBranch],
    threshold_label: &str,
    use_colors: bool,
) -> String {
    if branches.is_empty() {
        return format!(
            "No stale branches found (older than {}).",
            threshold_label.to_lowercase()
        );
    }

    let mut blocks = vec![if use_colors {
        let line = rule('─', RULE_WIDTH);
        format!(
            "\n{}\n{}\n{}",
            line.bright_black(),
            format!(" Stale Branches ({})", branches.len()).yellow().bold(),
            line.bright_black()
        )
    } else {
        section_header("Stale Branches", branches.len(), false)
    }];

    for branch in branches {
        let age = format!("Age: {} days", branch.age_days);
        blocks.push(if use_colors {
            let age = if branch.age_days > 90 {
                age.red().to_string()
            } else if branch.age_days > 60 {
                age.yellow().to_string()
            } else {
                age
            };
            format!(
                "\n  {}\n  Branch: {}\n  {}\n  {}",
                branch.repo.bright_blue(),
                branch.branch,
                age,
                format!("Last commit by: {}", branch.last_commit_author).bright_black()
            )
        } else {
            format!(
                "\n  {}\n  Branch: {}\n  {}\n  Last commit by: {}",
                branch.repo, branch.branch, age, branch.last_commit_author
            )
        });
    }
    blocks.join("\n")
}
