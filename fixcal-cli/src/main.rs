mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::FixcalConfig;

#[derive(Parser)]
#[command(name = "fixcal")]
#[command(about = "Sync a football club's upcoming fixtures into a calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one sync: fetch fixtures, reconcile them into the calendar
    Sync {
        /// Override the configured fixture window (days ahead)
        #[arg(long)]
        window_days: Option<u32>,
    },
    /// List the upcoming fixtures without writing anything
    Fixtures {
        /// Override the configured fixture window (days ahead)
        #[arg(long)]
        window_days: Option<u32>,
    },
    /// List the calendars visible to the configured credentials
    Calendars,
    /// Write a default config file to edit
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sync { window_days } => {
            let config = FixcalConfig::load()?.with_window_override(window_days);
            commands::sync::run(&config).await
        }
        Commands::Fixtures { window_days } => {
            let config = FixcalConfig::load()?.with_window_override(window_days);
            commands::fixtures::run(&config).await
        }
        Commands::Calendars => {
            let config = FixcalConfig::load()?;
            commands::calendars::run(&config).await
        }
        Commands::Init => commands::init::run(),
    }
}
