//! skilltrack: track the skills you are learning from the terminal.
//!
//! Each subcommand opens the configured storage, applies one change (or
//! prints a view) and exits. `skilltrack session` keeps the store open for
//! an interactive loop.

mod cli;
mod commands;
mod config;
mod display;
mod session;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use skilltrack_core::{SkillRepository, SkillStore};
use skilltrack_store::{JsonFileRepository, SqliteSkillRepository};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{Action, StatusFilter};
use crate::config::{AppConfig, Backend, StorageConfig};
use crate::display::Style;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 1. Configuration: file, then environment, then flags.
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok())?;
    config.apply_flags(cli.data, cli.backend);

    // 2. Logging.
    init_tracing(&config.logging.level);
    debug!(?config, "configuration loaded");

    // 3. Storage and store.
    let repository = open_repository(&config.storage)?;
    let mut store = SkillStore::open(repository);
    info!(skills = store.len(), origin = ?store.origin(), "store ready");

    let style = Style::detect(cli.no_color);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let action = match cli.command {
        Commands::Session => {
            return session::run(&mut store, io::stdin().lock(), &mut out, style);
        }
        Commands::List {
            category,
            pending,
            done,
        } => {
            store.set_filter(category);
            let status = if pending {
                StatusFilter::Pending
            } else if done {
                StatusFilter::Done
            } else {
                StatusFilter::All
            };
            Action::List { status }
        }
        Commands::Toggle { id } => Action::Toggle { id },
        Commands::Add {
            name,
            category,
            level,
            notes,
        } => Action::Add {
            name,
            category,
            level,
            notes,
        },
        Commands::Delete { id } => Action::Delete { id },
        Commands::Stats => Action::Stats,
        Commands::Categories => Action::Categories,
        Commands::Reset { yes } => Action::Reset { confirmed: yes },
    };

    commands::execute(&mut store, action, &mut out, style)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the persistence adapter named by the configuration.
fn open_repository(storage: &StorageConfig) -> Result<Box<dyn SkillRepository>> {
    let path = storage.resolved_path();
    info!(backend = ?storage.backend, path = %path.display(), "opening storage");

    let repository: Box<dyn SkillRepository> = match storage.backend {
        Backend::Sqlite => Box::new(
            SqliteSkillRepository::open(&path)
                .with_context(|| format!("failed to open database {}", path.display()))?,
        ),
        Backend::Json => Box::new(JsonFileRepository::new(path)),
    };
    Ok(repository)
}

/// Initialize the tracing subscriber on stderr. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
