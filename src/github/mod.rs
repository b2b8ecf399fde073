pub mod actions;
pub mod branches;
pub mod client;
pub mod repos;
pub mod search;
pub mod types;
pub mod user;

pub use client::{create_client, create_client_with_base, is_not_found, GITHUB_API_BASE};
pub use repos::{resolve_config_repos, resolve_team_repos, team_slug};
pub use search::search_issues;
pub use user::get_username;
