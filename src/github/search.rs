use anyhow::{anyhow, Result};
use octocrab::Octocrab;
use serde::Serialize;
use tracing::debug;

use crate::github::types::{SearchItem, SearchResults};

/// Search results are capped at a single page of this size
pub const SEARCH_PAGE_SIZE: u8 = 100;

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    per_page: u8,
}

/// Run one issue/PR search and return the first page of items
pub async fn search_issues(client: &Octocrab, query: &str) -> Result<Vec<SearchItem>> {
    debug!(query, "searching pull requests");

    let params = SearchParams {
        q: query,
        per_page: SEARCH_PAGE_SIZE,
    };
    let results: SearchResults = client
        .get("/search/issues", Some(&params))
        .await
        .map_err(|e| describe_search_error(query, e))?;

    debug!(query, total_count = results.total_count, "search complete");

    Ok(results.items)
}

/// Keep the API error and add a hint for failures a user can act on
fn describe_search_error(query: &str, e: octocrab::Error) -> anyhow::Error {
    let hint = match &e {
        octocrab::Error::GitHub { source, .. } => {
            let rate_limited = source.status_code == http::StatusCode::TOO_MANY_REQUESTS
                || (source.status_code == http::StatusCode::FORBIDDEN
                    && source.message.to_lowercase().contains("rate limit"));
            if source.status_code == http::StatusCode::UNAUTHORIZED {
                Some("the GitHub token may be invalid or expired")
            } else if rate_limited {
                Some("rate limit exceeded, wait a few minutes and try again")
            } else {
                None
            }
        }
        _ => None,
    };
    match hint {
        Some(hint) => anyhow!("GitHub API error for query '{}' ({}): {}", query, hint, e),
        None => anyhow!("GitHub API error for query '{}': {}", query, e),
    }
}
