use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aurkeep::config::{CheckConfig, CleanConfig};
use aurkeep::ops;
use aurkeep::remote::{AurClient, WorkflowDispatcher};
use aurkeep::storage::S3PackageStore;

#[derive(Parser)]
#[command(name = "aurkeep")]
#[command(version, about = "Keeps an AUR binary package mirror up to date")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the AUR for updates and trigger rebuild workflows
    Check,
    /// Delete package files superseded by a newer build
    Clean {
        /// Log what would be deleted without deleting anything
        #[arg(long)]
        dry_run: bool,
        /// Maximum number of packages to remove in one run
        #[arg(long)]
        max_deletions: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Check => check().await,
        Command::Clean {
            dry_run,
            max_deletions,
        } => clean(dry_run, max_deletions).await,
    }
}

async fn check() -> anyhow::Result<()> {
    let config = CheckConfig::from_env()?;
    info!("Checking {} packages for updates", config.packages.len());

    let store = S3PackageStore::new(&config.storage)?;
    let upstream = AurClient::default();
    let dispatcher = WorkflowDispatcher::new(&config.github.repository, &config.github.token);

    let summary = ops::run_check(&store, &upstream, &dispatcher, &config.packages).await?;

    if summary.triggered.is_empty() {
        info!("No updates found, all packages are up to date");
    } else {
        info!(
            "Updates found: {}, triggered builds for: {}",
            summary.triggered.len(),
            summary.triggered.join(", ")
        );
    }
    if !summary.failed.is_empty() {
        anyhow::bail!("failed to trigger builds for: {}", summary.failed.join(", "));
    }

    Ok(())
}

async fn clean(dry_run: bool, max_deletions: Option<usize>) -> anyhow::Result<()> {
    let config = CleanConfig::from_env(dry_run.then_some(true), max_deletions)?;
    info!(
        "Cleaning bucket {} (dry run: {}, max deletions: {})",
        config.storage.bucket, config.dry_run, config.max_deletions
    );

    let store = S3PackageStore::new(&config.storage)?;
    let options = ops::CleanOptions {
        dry_run: config.dry_run,
        max_deletions: config.max_deletions,
    };

    let summary = ops::run_clean(&store, &options).await?;

    if summary.dry_run {
        info!(
            "Dry run: {} of {} files would be deleted",
            summary.deleted_keys.len(),
            summary.examined
        );
    } else {
        info!("Deleted {} files", summary.deleted_keys.len());
    }
    if !summary.removed_names.is_empty() {
        info!("Packages with removed files: {}", summary.removed_names.join(", "));
    }
    if summary.truncated {
        warn!("Deletion cap reached, run again to continue pruning");
    }

    Ok(())
}
