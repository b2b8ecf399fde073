use anyhow::{Context, Result};
use octocrab::Octocrab;
use std::time::Duration;

/// Public GitHub REST endpoint
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Upper bound on connecting, reading, or writing a single request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create an authenticated GitHub client using a personal access token
pub fn create_client(token: &str) -> Result<Octocrab> {
    create_client_with_base(token, GITHUB_API_BASE)
}

/// Same as [`create_client`] but against an arbitrary API root (GitHub
/// Enterprise, or a mock server in tests).
pub fn create_client_with_base(token: &str, base_uri: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .base_uri(base_uri)
        .with_context(|| format!("Invalid GitHub API base URI: {}", base_uri))?
        .set_connect_timeout(Some(REQUEST_TIMEOUT))
        .set_read_timeout(Some(REQUEST_TIMEOUT))
        .set_write_timeout(Some(REQUEST_TIMEOUT))
        .build()
        .context("Failed to create GitHub client")
}

/// True when the API answered 404, which for per-repository resources means
/// the feature (Actions, branch access) is not available rather than a fault.
pub fn is_not_found(err: &octocrab::Error) -> bool {
    matches!(
        err,
        octocrab::Error::GitHub { source, .. } if source.status_code == http::StatusCode::NOT_FOUND
    )
}
