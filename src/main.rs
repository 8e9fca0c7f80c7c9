use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use price_tracker::scheduler::{DailySchedule, ProductScheduler};
use price_tracker::storage::{JsonFileStore, ReadingStore};
use price_tracker::utils::logging;
use price_tracker::{build_manager, AppConfig};

/// Watch one product page and email when its price drops to a threshold.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Run a single check and exit instead of staying on the daily schedule
    #[arg(long)]
    once: bool,

    /// Print the last saved reading and exit
    #[arg(long, conflicts_with = "once")]
    show_last: bool,

    /// Load environment variables from this file instead of ./.env
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
    logging::init()?;

    // Reported once as a status line; not handed back to anyhow.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.show_last {
        let store = JsonFileStore::new(config.storage.data_file.clone());
        match store.load()? {
            Some(reading) => println!("{}", serde_json::to_string_pretty(&reading)?),
            None => warn!("No reading saved yet at {}", store.path().display()),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let manager = build_manager(&config)?;
    let mut scheduler = ProductScheduler::new(
        manager,
        DailySchedule::new(config.scheduler.check_time),
    );

    if cli.once {
        scheduler.run_cycle().await;
        return Ok(ExitCode::SUCCESS);
    }

    info!("Price Tracker Started. Monitoring...");
    scheduler.run_forever().await;
    Ok(ExitCode::SUCCESS)
}
