//! Quotebook CLI
//!
//! Headless front end: show a random quote, add and import quotes, export the
//! collection, and sync with the remote endpoint.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing::{info, warn};

use quotebook_core::logging::init_logging;
use quotebook_core::notification::Notice;
use quotebook_core::prelude::*;
use quotebook_remote::HttpRemote;

use render::{render_categories, render_quote, StdoutNotifier, NO_QUOTES};

/// Quotebook - random quotes with remote sync
#[derive(Parser)]
#[command(name = "quotebook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Store, filter and sync quotes")]
struct Cli {
    /// Directory holding the quote store (overrides QUOTEBOOK_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Remote endpoint (overrides QUOTEBOOK_REMOTE_URL)
    #[arg(long, global = true)]
    remote_url: Option<String>,

    /// Default log level (overrides QUOTEBOOK_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a random quote
    Show {
        /// Category to draw from; defaults to the last one used
        #[arg(long, short)]
        category: Option<String>,
        /// Draw from every category
        #[arg(long, conflicts_with = "category")]
        all: bool,
    },

    /// List categories
    Categories,

    /// Add a new quote
    Add {
        /// Quote text
        text: String,
        /// Quote category
        #[arg(long, short)]
        category: String,
    },

    /// Import quotes from a JSON file holding an array of quotes
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Export all quotes to quotes.json
    Export {
        /// Directory to write quotes.json into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Run one sync pass against the remote
    Sync,

    /// Send every local quote to the remote
    Push,

    /// Keep syncing on a fixed interval until interrupted
    Watch {
        /// Seconds between passes (overrides QUOTEBOOK_SYNC_INTERVAL_SECS)
        #[arg(long)]
        interval: Option<u64>,
        /// Also send every local quote after each fetch
        #[arg(long)]
        push: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_logging(
        &config.log_dir.to_string_lossy(),
        "quotebook.log",
        &config.log_level,
    )?;

    let kv = FileKv::in_dir(&config.data_dir)
        .await
        .with_context(|| format!("Failed to open data directory {:?}", config.data_dir))?;
    let store = QuoteStore::open(Arc::new(kv), Arc::new(MemoryKv::new())).await?;

    match run(cli.command, store, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match classify(&err) {
            Some(Failure::User(message)) => {
                eprintln!("{}", message);
                Ok(ExitCode::FAILURE)
            }
            Some(Failure::Retryable(message)) => {
                warn!("Remote unavailable, try again later: {}", message);
                Ok(ExitCode::FAILURE)
            }
            None => Err(err),
        },
    }
}

/// How a failed command is reported
#[derive(Debug, PartialEq, Eq)]
enum Failure {
    /// Bad input: printed for the user
    User(String),
    /// Remote unreachable: logged only
    Retryable(String),
}

fn classify(err: &anyhow::Error) -> Option<Failure> {
    let cause = err.chain().find_map(|e| e.downcast_ref::<Error>())?;
    if cause.is_user_facing() {
        Some(Failure::User(cause.to_string()))
    } else if cause.is_retryable() {
        Some(Failure::Retryable(cause.to_string()))
    } else {
        None
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<QuotebookConfig> {
    let mut config = QuotebookConfig::from_env()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(url) = &cli.remote_url {
        config.remote_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

async fn run(command: Commands, mut store: QuoteStore, config: &QuotebookConfig) -> anyhow::Result<()> {
    match command {
        Commands::Show { category, all } => {
            let filter = match category {
                _ if all => CategoryFilter::All,
                Some(value) => CategoryFilter::parse(value.trim()),
                None => store.last_category().await?,
            };
            match store.select(&filter).await? {
                Some(quote) => println!("{}", render_quote(&quote)),
                None => println!("{}", NO_QUOTES),
            }
        }

        Commands::Categories => {
            let active = store.last_category().await?;
            println!("{}", render_categories(&store.categories(), &active));
        }

        Commands::Add { text, category } => {
            let quote = store.add(&text, &category).await?;
            println!("{}", render_quote(&quote));
        }

        Commands::Import { file } => {
            let imported = store
                .import_file(&file)
                .await
                .with_context(|| format!("Failed to import {:?}", file))?;
            println!(
                "{}",
                Notice::Imported {
                    count: imported.len()
                }
            );
        }

        Commands::Export { dir } => {
            let path = store.export_to(&dir).await?;
            println!("Exported {} quotes to {}", store.len(), path.display());
        }

        Commands::Sync => {
            let service = sync_service(store, config)?;
            service.sync_once().await?;
        }

        Commands::Push => {
            let service = sync_service(store, config)?;
            let sent = service.push_all().await?;
            println!("Sent {} quotes", sent);
        }

        Commands::Watch { interval, push } => {
            let mut sync_config = config.sync_config(push);
            if let Some(secs) = interval {
                sync_config.interval_secs = secs;
            }
            let service = Arc::new(sync_service(store, config)?);

            let mut manager = SyncManager::new();
            manager.start_periodic_sync(service, sync_config);
            info!("Watching {} (Ctrl-C to stop)", config.remote_url);

            tokio::signal::ctrl_c().await?;
            manager.shutdown().await;
        }
    }

    Ok(())
}

fn sync_service(store: QuoteStore, config: &QuotebookConfig) -> anyhow::Result<SyncService> {
    let remote = HttpRemote::from_config(config)?;
    Ok(SyncService::new(
        Arc::new(Mutex::new(store)),
        Arc::new(remote),
        Arc::new(StdoutNotifier),
    ))
}
