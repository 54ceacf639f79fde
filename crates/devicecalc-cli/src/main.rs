//! DeviceCalc CLI
//!
//! Command-line harness around the calculation engine.
//!
//! # Usage
//!
//! ```bash
//! devicecalc --catalog devices.json devices list
//! devicecalc --catalog devices.json calculate cryo-one --uses-per-day 6 --unit-price 3500
//! devicecalc --catalog devices.json calculate cryo-one --tier gold --flatrate --format json
//! devicecalc --catalog devices.json alternatives cryo-one --factor 0.7
//! devicecalc config init
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "devicecalc")]
#[command(author = "DeviceCalc")]
#[command(version)]
#[command(about = "Treatment device leasing and profitability calculator", long_about = None)]
struct Cli {
    /// Device catalog file (JSON array of devices)
    #[arg(long, env = "DEVICECALC_CATALOG")]
    catalog: Option<String>,

    /// Engine config file (.toml or .json), overrides the profile config
    #[arg(long, env = "DEVICECALC_CONFIG")]
    config: Option<String>,

    /// Output format (defaults to the config's `default_format`, then table)
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the device catalog
    Devices {
        #[command(subcommand)]
        action: DeviceCommands,
    },
    /// Run a full calculation for a device
    Calculate(ScenarioArgs),
    /// Rank bundle alternatives for a device
    Alternatives(ScenarioArgs),
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum DeviceCommands {
    /// List active devices
    List,
    /// Get device details
    Get { id: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init,
}

/// Usage assumptions for one calculation
#[derive(Args, Debug, Clone)]
struct ScenarioArgs {
    /// Device ID
    device: String,

    /// Treatments per working day
    #[arg(long, default_value = "0")]
    uses_per_day: Decimal,

    /// Price per treatment incl. tax (defaults to the device's usage price)
    #[arg(long)]
    unit_price: Option<Decimal>,

    /// Payment mode
    #[arg(long, value_enum, default_value = "leasing")]
    payment: PaymentArg,

    /// Leasing duration in months
    #[arg(long)]
    months: Option<u32>,

    /// Include insurance
    #[arg(long)]
    insurance: bool,

    /// Service tier
    #[arg(long, value_enum, default_value = "bronze")]
    tier: TierArg,

    /// Leasing slider position, 0.0-1.0
    #[arg(long, default_value = "0.5")]
    factor: Decimal,

    /// Request the consumable flatrate
    #[arg(long)]
    flatrate: bool,

    /// Working days per month
    #[arg(long)]
    working_days: Option<u32>,

    /// Leasing model
    #[arg(long, value_enum, default_value = "hybrid")]
    model: ModelArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaymentArg {
    Leasing,
    Cash,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    Bronze,
    Silver,
    Gold,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    Hybrid,
    AllInclusive,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config not loaded ({}), using defaults", e);
        config::Config::default()
    });

    let format = config.output_format(cli.format);

    let result = match cli.command {
        Commands::Devices { action } => {
            commands::devices::handle(action, &config, cli.catalog.as_deref(), format).await
        }
        Commands::Calculate(args) => {
            commands::calculate::handle(
                args,
                &config,
                cli.catalog.as_deref(),
                cli.config.as_deref(),
                format,
                commands::calculate::View::Full,
            )
            .await
        }
        Commands::Alternatives(args) => {
            commands::calculate::handle(
                args,
                &config,
                cli.catalog.as_deref(),
                cli.config.as_deref(),
                format,
                commands::calculate::View::Alternatives,
            )
            .await
        }
        Commands::Config { action } => commands::config::handle(action, &config, cli.profile.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
