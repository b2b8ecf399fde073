use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use devops_digest::config::{Config, ConfigError, Thresholds};
use devops_digest::credentials::CredentialError;
use devops_digest::output::{rule, should_use_colors};
use devops_digest::report::ReportScope;
use devops_digest::time::format_span;
use octocrab::Octocrab;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate, save, and print the full digest (default if no subcommand)
    Report {
        /// Open the saved report in the default viewer
        #[arg(long)]
        view: bool,

        /// Directory for saved reports (defaults to the local data directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Check the GitHub token and show the authenticated user
    Check,
    /// Show open PRs you authored, are reviewing, or are mentioned in
    Prs,
    /// Show recently failed workflow runs in your team repositories
    Actions,
    /// Show your branches whose last commit is older than the stale threshold
    Stale,
}

#[derive(Parser, Debug)]
#[command(name = "devops-digest")]
#[command(about = "Daily digest of open PRs, failed workflow runs, and stale branches", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/devops-digest/data.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,devops_digest=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Map a failed command to an exit code
fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ConfigError>().is_some() {
        EXIT_CONFIG
    } else if err.downcast_ref::<CredentialError>().is_some() {
        EXIT_AUTH
    } else {
        EXIT_NETWORK
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Report {
        view: false,
        output_dir: None,
    });

    let token = match devops_digest::credentials::get_token() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    };

    let client = match devops_digest::github::create_client(&token) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create GitHub client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    let config_path = cli.config.map(PathBuf::from);
    let result = match command {
        Commands::Check => run_check(&client).await,
        Commands::Prs => run_prs(&client).await,
        Commands::Actions => match load(config_path) {
            Ok((config, thresholds)) => run_actions(&client, &config, &thresholds).await,
            Err(e) => Err(e),
        },
        Commands::Stale => match load(config_path) {
            Ok((config, thresholds)) => run_stale(&client, &config, &thresholds).await,
            Err(e) => Err(e),
        },
        Commands::Report { view, output_dir } => match load(config_path) {
            Ok((config, thresholds)) => {
                run_report(&client, &config, &thresholds, view, output_dir).await
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        let code = exit_code(&e);
        if code == EXIT_CONFIG {
            eprintln!("Config error: {:#}", e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(code);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn load(path: Option<PathBuf>) -> Result<(Config, Thresholds)> {
    let config = devops_digest::config::load_config(path)?;
    let thresholds = config.thresholds()?;
    tracing::debug!(
        repositories = config.repositories.len(),
        teams = config.teams.len(),
        "loaded config"
    );
    Ok((config, thresholds))
}

async fn run_check(client: &Octocrab) -> Result<()> {
    let username = devops_digest::github::get_username(client).await?;
    println!("GitHub token is valid. Authenticated as: {}", username);
    Ok(())
}

async fn run_prs(client: &Octocrab) -> Result<()> {
    let username = devops_digest::github::get_username(client).await?;
    println!("Fetching PRs for {}...", username);

    let grouped =
        devops_digest::collect::collect_pull_requests(client, &username, Utc::now()).await?;
    println!("{}", devops_digest::output::format_prs(&grouped, should_use_colors()));
    Ok(())
}

/// Team repositories, or the configured repositories when no team matched.
///
/// `configured` skips a second lookup when the caller already resolved them.
async fn resolve_run_repos(
    client: &Octocrab,
    config: &Config,
    configured: Option<&[String]>,
) -> Result<Vec<String>> {
    let team_repos = devops_digest::github::resolve_team_repos(client, &config.teams).await?;
    if !team_repos.is_empty() {
        return Ok(team_repos);
    }
    eprintln!("No repositories found for configured teams, using configured repositories.");
    match configured {
        Some(repos) => Ok(repos.to_vec()),
        None => devops_digest::github::resolve_config_repos(client, &config.repositories).await,
    }
}

async fn run_actions(client: &Octocrab, config: &Config, thresholds: &Thresholds) -> Result<()> {
    println!("Loading team repositories from config...");
    let repos = resolve_run_repos(client, config, None).await?;
    if repos.is_empty() {
        println!("No matching repositories found.");
        return Ok(());
    }

    println!("Checking {} repositories for failed runs...", repos.len());
    let now = Utc::now();
    let runs = devops_digest::collect::collect_failed_runs(
        client,
        &repos,
        thresholds.failed_run_window,
        now,
    )
    .await;
    println!(
        "{}",
        devops_digest::output::format_failed_runs(
            &runs,
            &format_span(thresholds.failed_run_window),
            now,
            should_use_colors()
        )
    );
    Ok(())
}

async fn run_stale(client: &Octocrab, config: &Config, thresholds: &Thresholds) -> Result<()> {
    let username = devops_digest::github::get_username(client).await?;

    println!("Loading repositories from config...");
    let repos = devops_digest::github::resolve_config_repos(client, &config.repositories).await?;
    if repos.is_empty() {
        println!("No matching repositories found.");
        return Ok(());
    }

    let threshold = format_span(thresholds.stale_after);
    println!(
        "Fetching stale branches for {} (older than {})...",
        username,
        threshold.to_lowercase()
    );
    let branches = devops_digest::collect::collect_stale_branches(
        client,
        &username,
        &repos,
        &thresholds.excluded_branches,
        thresholds.stale_after,
        Utc::now(),
    )
    .await;
    println!(
        "{}",
        devops_digest::output::format_stale_branches(&branches, &threshold, should_use_colors())
    );
    Ok(())
}

async fn run_report(
    client: &Octocrab,
    config: &Config,
    thresholds: &Thresholds,
    view: bool,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let use_colors = should_use_colors();
    let status = |text: String| {
        if use_colors {
            println!("{}", text.green());
        } else {
            println!("{}", text);
        }
    };
    let warning = |text: String| {
        if use_colors {
            println!("{}", text.yellow());
        } else {
            println!("{}", text);
        }
    };

    println!();
    let banner = [
        "╔════════════════════════════════════════╗",
        "║       DevOps Digest Report             ║",
        "╚════════════════════════════════════════╝",
    ];
    for line in banner {
        if use_colors {
            println!("{}", line.cyan());
        } else {
            println!("{}", line);
        }
    }
    println!();

    let username = devops_digest::github::get_username(client).await?;
    status(format!("Authenticated as: {}", username));
    println!();

    println!("Loading repositories from config...");
    let repos = devops_digest::github::resolve_config_repos(client, &config.repositories).await?;
    if repos.is_empty() {
        warning("No matching repositories found in config.".to_string());
    } else {
        status(format!("Found {} repositories", repos.len()));
    }

    println!("Loading team repositories for workflow runs...");
    let run_repos = resolve_run_repos(client, config, Some(repos.as_slice())).await?;
    status(format!("Using {} repositories for workflow runs", run_repos.len()));

    println!();
    println!("Fetching data...");
    let scope = ReportScope {
        repos: &repos,
        run_repos: &run_repos,
    };
    let report =
        devops_digest::report::assemble_report(client, &username, scope, thresholds, Utc::now())
            .await;
    let content = devops_digest::report::render_report(&report);

    let reports_dir = output_dir.unwrap_or_else(devops_digest::config::get_reports_dir);
    let date = report.generated_at.with_timezone(&Local).date_naive();
    let report_path = devops_digest::report::save_report(&reports_dir, date, &content)?;
    println!();
    status(format!("Report saved to: {}", report_path.display()));

    if report.is_degraded() {
        println!();
        warning(format!(
            "{} error(s) occurred during generation",
            report.errors.len()
        ));
    }

    let heavy_rule = rule('═', 80);
    println!();
    println!("{}", heavy_rule);
    println!("REPORT CONTENT");
    println!("{}", heavy_rule);
    println!();
    println!("{}", content);
    println!();
    println!("{}", heavy_rule);

    if view {
        println!();
        println!("Opening report in default viewer...");
        devops_digest::viewer::open_path(&report_path);
    }

    Ok(())
}
