pub mod commands;

use std::process::ExitCode;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use shipwise_core::config::{AppConfig, LoadOptions, LogFormat};
use tracing_subscriber::EnvFilter;

use crate::commands::quote::QuoteArgs;

#[derive(Debug, Parser)]
#[command(
    name = "shipwise",
    about = "Shipwise shipping cost estimator",
    long_about = "Compare carrier prices and delivery estimates for a domestic parcel, and inspect the estimator's configuration.",
    after_help = "Examples:\n  shipwise quote --from Mumbai --to Pune --weight 2 --speed standard\n  shipwise quote --from Delhi --to Chennai --weight 12 --speed express --json\n  shipwise doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Price a shipment with every carrier and recommend one")]
    Quote(QuoteArgs),
    #[command(about = "List the carrier catalog with rates and reliability")]
    Carriers {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List supported cities and whether they have route-specific distances")]
    Cities,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, carrier catalog, distance table, and a sample quote")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Commands report config failures themselves; logging falls back to defaults.
    let logging_config = AppConfig::load(LoadOptions::default()).unwrap_or_default();
    if let Err(error) = init_logging(&logging_config) {
        eprintln!("logging setup failed: {error}");
    }

    let result = match cli.command {
        Command::Quote(args) => commands::quote::run(&args),
        Command::Carriers { json } => commands::carriers::run(json),
        Command::Cities => commands::cities::run(),
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("SHIPWISE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.trim()));
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    let installed = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|error| anyhow!(error))
}
