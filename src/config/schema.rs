use serde::{Deserialize, Serialize};

/// Branch names never reported as stale, unless overridden in the config file.
pub const DEFAULT_EXCLUDED_BRANCHES: &[&str] = &[
    "main",
    "master",
    "develop",
    "development",
    "staging",
    "production",
    "release",
];

pub const DEFAULT_FAILED_RUN_WINDOW: &str = "12h";
pub const DEFAULT_STALE_AFTER: &str = "30days";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub repositories: Vec<NamedEntry>,
    #[serde(default)]
    pub teams: Vec<NamedEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_branches: Option<Vec<String>>,
    /// How far back to look for failed workflow runs (humantime, e.g. "12h")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_run_window: Option<String>,
    /// Minimum head-commit age for a branch to count as stale (e.g. "30days")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_after: Option<String>,
}

/// A `{"name": "..."}` entry, used for both repositories and teams.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamedEntry {
    pub name: String,
}
