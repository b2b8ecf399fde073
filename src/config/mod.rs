mod schema;

pub use schema::{
    Config, NamedEntry, DEFAULT_EXCLUDED_BRANCHES, DEFAULT_FAILED_RUN_WINDOW, DEFAULT_STALE_AFTER,
};

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration problems. All of them are fatal and reported before any
/// network call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse config: invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No repositories defined in config file")]
    NoRepositories,

    #[error("No teams defined in config file")]
    NoTeams,

    #[error("Invalid duration for {field}: '{value}'")]
    InvalidDuration { field: &'static str, value: String },
}

/// Resolved knobs the collectors need, derived from [`Config`].
#[derive(Debug, Clone)]
pub struct Thresholds {
    pub failed_run_window: Duration,
    pub stale_after: Duration,
    pub excluded_branches: Vec<String>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            failed_run_window: Duration::hours(12),
            stale_after: Duration::days(30),
            excluded_branches: DEFAULT_EXCLUDED_BRANCHES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Parse duration strings and fill in defaults.
    pub fn thresholds(&self) -> Result<Thresholds, ConfigError> {
        let failed_run_window = parse_duration(
            "failed_run_window",
            self.failed_run_window
                .as_deref()
                .unwrap_or(DEFAULT_FAILED_RUN_WINDOW),
        )?;
        let stale_after = parse_duration(
            "stale_after",
            self.stale_after.as_deref().unwrap_or(DEFAULT_STALE_AFTER),
        )?;
        let excluded_branches = match &self.excluded_branches {
            Some(names) => names.clone(),
            None => Thresholds::default().excluded_branches,
        };

        Ok(Thresholds {
            failed_run_window,
            stale_after,
            excluded_branches,
        })
    }
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
    };
    let std_duration = humantime::parse_duration(value.trim()).map_err(|_| invalid())?;
    let duration = Duration::from_std(std_duration).map_err(|_| invalid())?;
    if duration <= Duration::zero() {
        return Err(invalid());
    }
    // Collectors subtract the duration from the current time
    if Utc::now().checked_sub_signed(duration).is_none() {
        return Err(invalid());
    }
    Ok(duration)
}

/// Get the config directory path (~/.config/devops-digest/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config").join("devops-digest"))
        .unwrap_or_else(|| PathBuf::from(".config/devops-digest"))
}

/// Get the default config file path (~/.config/devops-digest/data.json)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("data.json")
}

/// Get the directory generated reports are written to
pub fn get_reports_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("devops-digest/reports"))
        .unwrap_or_else(|| get_config_dir().join("reports"))
}

/// Load configuration from a JSON file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/devops-digest/data.json)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The JSON cannot be parsed
/// - A duration field is not a valid humantime duration
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        return Err(ConfigError::NotFound(config_path).into());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config =
        serde_json::from_str(&config_content).map_err(|source| ConfigError::Parse {
            path: config_path.clone(),
            source,
        })?;

    config.thresholds()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"{
                "repositories": [{"name": "api"}, {"name": "web"}],
                "teams": [{"name": "Platform Team"}],
                "excluded_branches": ["main", "trunk"],
                "failed_run_window": "6h",
                "stale_after": "14days"
            }"#,
        );
        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.repositories.len(), 2);
        assert_eq!(config.repositories[1].name, "web");
        assert_eq!(config.teams[0].name, "Platform Team");

        let thresholds = config.thresholds().unwrap();
        assert_eq!(thresholds.failed_run_window, Duration::hours(6));
        assert_eq!(thresholds.stale_after, Duration::days(14));
        assert_eq!(thresholds.excluded_branches, vec!["main", "trunk"]);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let file = write_config("{}");
        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        assert!(config.repositories.is_empty());
        assert!(config.teams.is_empty());
    }

    #[test]
    fn test_default_thresholds() {
        let thresholds = Config::default().thresholds().unwrap();
        assert_eq!(thresholds.failed_run_window, Duration::hours(12));
        assert_eq!(thresholds.stale_after, Duration::days(30));
        assert!(thresholds.excluded_branches.iter().any(|b| b == "main"));
        assert!(thresholds.excluded_branches.iter().any(|b| b == "master"));
        assert!(thresholds.excluded_branches.iter().any(|b| b == "develop"));
        assert!(thresholds.excluded_branches.iter().any(|b| b == "release"));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_config("{ not json");
        let err = load_config(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_duration() {
        let file = write_config(r#"{"stale_after": "a while"}"#);
        let err = load_config(Some(file.path().to_path_buf())).unwrap_err();
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::InvalidDuration { field, value }) => {
                assert_eq!(*field, "stale_after");
                assert_eq!(value, "a while");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_duration_rejected() {
        let config = Config {
            failed_run_window: Some("0s".to_string()),
            ..Config::default()
        };
        assert!(config.thresholds().is_err());
    }

    #[test]
    fn test_duration_beyond_calendar_rejected() {
        let file = write_config(r#"{"failed_run_window": "1000000years"}"#);
        let err = load_config(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidDuration {
                field: "failed_run_window",
                ..
            })
        ));

        let config = Config {
            stale_after: Some("1000000years".to_string()),
            ..Config::default()
        };
        assert!(config.thresholds().is_err());
    }
}
