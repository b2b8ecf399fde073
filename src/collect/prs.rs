use anyhow::Result;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use std::cmp::Reverse;
use std::collections::HashSet;

use crate::collect::types::{GroupedPullRequests, Involvement, PullRequest};
use crate::github::search_issues;
use crate::github::types::SearchItem;
use crate::time::age_in_days;

/// Fetch open PRs the user authored, was asked to review, or was mentioned in.
///
/// The three searches run concurrently; if any of them fails the whole call
/// fails.
pub async fn collect_pull_requests(
    client: &Octocrab,
    username: &str,
    now: DateTime<Utc>,
) -> Result<GroupedPullRequests> {
    let (authored, reviewing, mentioned) = tokio::try_join!(
        search_category(client, Involvement::Authored, username, now),
        search_category(client, Involvement::Reviewing, username, now),
        search_category(client, Involvement::Mentioned, username, now),
    )?;

    Ok(group_pull_requests(authored, reviewing, mentioned))
}

async fn search_category(
    client: &Octocrab,
    involvement: Involvement,
    username: &str,
    now: DateTime<Utc>,
) -> Result<Vec<PullRequest>> {
    let items = search_issues(client, &involvement.query(username)).await?;
    Ok(items
        .into_iter()
        .map(|item| to_pull_request(item, now))
        .collect())
}

fn to_pull_request(item: SearchItem, now: DateTime<Utc>) -> PullRequest {
    PullRequest {
        id: item.id,
        repo: item.repo_name(),
        title: item.title,
        number: item.number,
        age_days: age_in_days(item.created_at, now),
        url: item.html_url,
    }
}

/// Remove cross-category duplicates and order each category oldest first.
///
/// A PR id already present in a higher-precedence category
/// (authored > reviewing > mentioned) is dropped from the lower ones. Sorting
/// is stable, so PRs of equal age keep their search order.
pub fn group_pull_requests(
    mut authored: Vec<PullRequest>,
    mut reviewing: Vec<PullRequest>,
    mut mentioned: Vec<PullRequest>,
) -> GroupedPullRequests {
    let mut seen: HashSet<u64> = authored.iter().map(|pr| pr.id).collect();

    reviewing.retain(|pr| !seen.contains(&pr.id));
    seen.extend(reviewing.iter().map(|pr| pr.id));

    mentioned.retain(|pr| !seen.contains(&pr.id));

    for prs in [&mut authored, &mut reviewing, &mut mentioned] {
        prs.sort_by_key(|pr| Reverse(pr.age_days));
    }

    GroupedPullRequests {
        authored,
        reviewing,
        mentioned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn pr(id: u64, age_days: i64) -> PullRequest {
        PullRequest {
            id,
            repo: "org/a".to_string(),
            title: format!("PR {}", id),
            number: id,
            age_days,
            url: format!("https://github.com/org/a/pull/{}", id),
        }
    }

    fn ids(prs: &[PullRequest]) -> Vec<u64> {
        prs.iter().map(|pr| pr.id).collect()
    }

    #[test]
    fn test_authored_wins_over_mentioned() {
        let grouped = group_pull_requests(vec![pr(1, 10)], vec![], vec![pr(1, 10)]);
        assert_eq!(ids(&grouped.authored), vec![1]);
        assert!(grouped.mentioned.is_empty());
        assert_eq!(grouped.total(), 1);
    }

    #[test]
    fn test_precedence_across_all_categories() {
        let grouped = group_pull_requests(
            vec![pr(1, 1)],
            vec![pr(1, 1), pr(2, 2)],
            vec![pr(1, 1), pr(2, 2), pr(3, 3)],
        );
        assert_eq!(ids(&grouped.authored), vec![1]);
        assert_eq!(ids(&grouped.reviewing), vec![2]);
        assert_eq!(ids(&grouped.mentioned), vec![3]);
    }

    #[test]
    fn test_reviewing_wins_over_mentioned() {
        let grouped = group_pull_requests(vec![], vec![pr(5, 4)], vec![pr(5, 4), pr(6, 1)]);
        assert_eq!(ids(&grouped.reviewing), vec![5]);
        assert_eq!(ids(&grouped.mentioned), vec![6]);
    }

    #[test]
    fn test_sorted_oldest_first() {
        let grouped = group_pull_requests(vec![pr(1, 2), pr(2, 30), pr(3, 7)], vec![], vec![]);
        assert_eq!(ids(&grouped.authored), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_ages() {
        let grouped = group_pull_requests(
            vec![],
            vec![pr(4, 3), pr(9, 5), pr(2, 3), pr(7, 3)],
            vec![],
        );
        assert_eq!(ids(&grouped.reviewing), vec![9, 4, 2, 7]);
    }

    #[test]
    fn test_sections_skip_empty_categories() {
        let grouped = group_pull_requests(vec![pr(1, 1)], vec![], vec![pr(2, 1)]);
        let labels: Vec<_> = grouped.sections().map(|(inv, _)| inv.label()).collect();
        assert_eq!(labels, vec!["My PRs", "Mentioned"]);
    }

    #[test]
    fn test_queries() {
        assert_eq!(Involvement::Authored.query("bob"), "is:pr is:open author:bob");
        assert_eq!(
            Involvement::Reviewing.query("bob"),
            "is:pr is:open review-requested:bob"
        );
        assert_eq!(Involvement::Mentioned.query("bob"), "is:pr is:open mentions:bob");
    }

    #[test]
    fn test_to_pull_request_age() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let item = SearchItem {
            id: 42,
            number: 7,
            title: "Add feature".to_string(),
            html_url: "https://github.com/org/a/pull/7".to_string(),
            repository_url: "https://api.github.com/repos/org/a".to_string(),
            created_at: now - Duration::days(10) - Duration::hours(3),
        };
        let pr = to_pull_request(item, now);
        assert_eq!(pr.id, 42);
        assert_eq!(pr.repo, "org/a");
        assert_eq!(pr.age_days, 10);
        assert_eq!(pr.number, 7);
    }
}
