mod compare;
mod history;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use taskaloop_core::{AppConfig, StoreCatalog};
use tracing_subscriber::EnvFilter;

use crate::compare::SearchArgs;
use crate::history::HistoryCommands;

#[derive(Debug, Parser)]
#[command(name = "taskaloop-cli")]
#[command(about = "TaskaLoop price comparison command line interface")]
struct Cli {
    /// Store catalog YAML; overrides `TASKALOOP_CATALOG_PATH`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List stores near a location
    Stores {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Find the best nearby price for each item
    Prices {
        #[command(flatten)]
        search: SearchArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Items to price, e.g. apple "orange juice"
        items: Vec<String>,
    },
    /// Build a shopping plan grouping each item under its cheapest store
    Plan {
        #[command(flatten)]
        search: SearchArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Items to buy
        items: Vec<String>,
    },
    /// Record and inspect observed prices
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

/// Load the catalog from `--catalog`, then `TASKALOOP_CATALOG_PATH`, falling
/// back to the built-in catalog.
fn open_catalog(override_path: Option<&Path>, config: &AppConfig) -> anyhow::Result<StoreCatalog> {
    let catalog = match override_path.or(config.catalog_path.as_deref()) {
        Some(path) => {
            let catalog = taskaloop_core::load_catalog(path)
                .with_context(|| format!("loading store catalog {}", path.display()))?;
            tracing::info!(path = %path.display(), stores = catalog.len(), "loaded store catalog");
            catalog
        }
        None => {
            let catalog = StoreCatalog::builtin()?;
            tracing::info!(stores = catalog.len(), "using built-in store catalog");
            catalog
        }
    };
    Ok(catalog)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = taskaloop_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = ?config, "loaded configuration");

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("taskaloop-cli ready; run with --help to list commands");
        return Ok(());
    };

    let radius = config.default_radius_miles;
    match command {
        Commands::Stores { search } => {
            let catalog = open_catalog(cli.catalog.as_deref(), &config)?;
            compare::run_stores(&catalog, &search, radius)?;
        }
        Commands::Prices {
            search,
            json,
            items,
        } => {
            let catalog = open_catalog(cli.catalog.as_deref(), &config)?;
            compare::run_prices(&catalog, &search, &items, json, radius)?;
        }
        Commands::Plan {
            search,
            json,
            items,
        } => {
            let catalog = open_catalog(cli.catalog.as_deref(), &config)?;
            compare::run_plan(&catalog, &search, &items, json, radius)?;
        }
        Commands::History { command } => match command {
            HistoryCommands::Record {
                item,
                store,
                price,
                unit,
            } => {
                let catalog = open_catalog(cli.catalog.as_deref(), &config)?;
                history::run_history_record(
                    &config.history_path,
                    &catalog,
                    &item,
                    &store,
                    price,
                    &unit,
                )?;
            }
            HistoryCommands::Show {
                item,
                window_days,
                json,
            } => history::run_history_show(&config.history_path, &item, window_days, json)?,
        },
    }

    Ok(())
}
