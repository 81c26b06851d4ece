use chrono::{DateTime, Utc};
use clap::Parser;
use relfetch::core::format_error_with_help;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::fetch::FetchOptions;

#[derive(Parser)]
#[command(name = "relfetch")]
#[command(about = "Download assets from GitHub releases")]
#[command(version)]
struct Cli {
    /// Repository as owner/name
    repo: String,
    /// Release tag to fetch; a partial tag searches the release history
    #[arg(short, long)]
    tag: Option<String>,
    /// Allow pre-releases when resolving the latest release
    #[arg(long)]
    pre_release: bool,
    /// Only download when the release is newer than --since
    #[arg(long, requires = "since")]
    upgrade_only: bool,
    /// Current version timestamp (RFC 3339), used with --upgrade-only
    #[arg(long, value_parser = parse_since, requires = "upgrade_only")]
    since: Option<DateTime<Utc>>,
    /// Select the asset whose name contains this text (repeatable)
    #[arg(short, long = "asset")]
    asset: Vec<String>,
    /// Output file or directory, or "-" for stdout
    #[arg(long)]
    to: Option<String>,
    /// List the release's assets instead of downloading
    #[arg(short, long)]
    list: bool,
    /// GitHub API token (overrides config and environment)
    #[arg(long)]
    token: Option<String>,
    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn parse_since(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

impl From<Cli> for FetchOptions {
    fn from(cli: Cli) -> Self {
        Self {
            repo: cli.repo,
            tag: cli.tag,
            prerelease: cli.pre_release,
            since: cli.since.filter(|_| cli.upgrade_only),
            asset_filters: cli.asset,
            to: cli.to,
            list: cli.list,
            token: cli.token,
            config: cli.config,
            quiet: cli.quiet,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so `--to -` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let repo = cli.repo.clone();

    match cli::fetch::run(cli.into()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_no_upgrade() => {
            eprintln!("{}: {}", repo, e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\n{}", format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
