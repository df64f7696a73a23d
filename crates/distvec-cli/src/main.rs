//! Distvec CLI — Distance-vector routing simulator.
//!
//! Subcommands: init, simulate, table, route.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::DistvecConfig;

/// Distvec — converge, trace and reconverge distance-vector routing tables.
#[derive(Parser, Debug)]
#[command(name = "distvec", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "distvec.toml")]
    config: PathBuf,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Run a full simulation: initial convergence, then every change in order.
    Simulate(commands::simulate::SimulateArgs),
    /// Converge a topology once and print the forwarding tables.
    Table(commands::table::TableArgs),
    /// Trace the path between two nodes.
    Route(commands::route::RouteArgs),
}

fn init_tracing(config: &DistvecConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Init(args) = &cli.command {
        return commands::init::run(args, &cli.config);
    }

    let mut config = DistvecConfig::load(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_tracing(&config);

    match &cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Simulate(args) => commands::simulate::run(args, config),
        Commands::Table(args) => commands::table::run(args, &config),
        Commands::Route(args) => commands::route::run(args, &config),
    }
}
