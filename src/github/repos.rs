use anyhow::{Context, Result};
use octocrab::Octocrab;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use crate::config::{ConfigError, NamedEntry};
use crate::github::types::{Organization, PageParams, Repository};

const REPOS_PAGE_SIZE: u8 = 100;

/// Resolve configured short repository names to "owner/name" identifiers.
///
/// Walks every page of `GET /user/repos` until an empty page comes back and
/// keeps the repositories whose short name is configured, in listing order.
/// Any API failure aborts the resolution.
pub async fn resolve_config_repos(client: &Octocrab, entries: &[NamedEntry]) -> Result<Vec<String>> {
    let wanted: HashSet<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    if wanted.is_empty() {
        return Err(ConfigError::NoRepositories.into());
    }

    let mut matched = Vec::new();
    let mut page = 1;
    loop {
        let repos: Vec<Repository> = client
            .get("/user/repos", Some(&PageParams::page(REPOS_PAGE_SIZE, page)))
            .await
            .with_context(|| format!("Failed to list accessible repositories (page {})", page))?;
        if repos.is_empty() {
            break;
        }

        matched.extend(
            repos
                .into_iter()
                .filter(|repo| wanted.contains(repo.name.as_str()))
                .map(|repo| repo.full_name),
        );
        page += 1;
    }

    debug!(pages = page - 1, matched = matched.len(), "resolved configured repositories");
    Ok(matched)
}

/// Resolve configured team names to the repositories those teams own.
///
/// Every (organization, team) pair is tried; a team that does not exist in an
/// organization, or that the token cannot see, contributes nothing. Only the
/// organization listing itself is allowed to fail the call.
pub async fn resolve_team_repos(client: &Octocrab, teams: &[NamedEntry]) -> Result<Vec<String>> {
    if teams.is_empty() {
        return Err(ConfigError::NoTeams.into());
    }

    let orgs: Vec<Organization> = client
        .get("/user/orgs", None::<&()>)
        .await
        .context("Failed to list organizations")?;

    let mut matched = BTreeSet::new();
    for org in &orgs {
        for team in teams {
            let slug = team_slug(&team.name);
            let route = format!("/orgs/{}/teams/{}/repos", org.login, slug);
            match client
                .get::<Vec<Repository>, _, _>(route, Some(&PageParams::first(REPOS_PAGE_SIZE)))
                .await
            {
                Ok(repos) => matched.extend(repos.into_iter().map(|repo| repo.full_name)),
                Err(e) => {
                    debug!(org = %org.login, team = %slug, error = %e, "team lookup skipped");
                }
            }
        }
    }

    Ok(matched.into_iter().collect())
}

/// Team slug as GitHub derives it for simple names: lowercase, spaces to hyphens
pub fn team_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
