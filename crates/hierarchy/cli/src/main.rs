//! Hierarchy CLI - operator interface for a capacity-bounded member tree
//!
//! This CLI keeps a hierarchy in a local JSON state file and lets operators:
//! - Create a hierarchy with an admin, capacity and pricing policy
//! - Recruit and evict members on behalf of a caller
//! - Inspect members, children, the whole tree, price and occupancy
//! - Verify the state file and list collected admission payments

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;
mod state;

use commands::{membership, query};
use config::CliConfig;
use error::CliResult;
use output::OutputFormat;
use state::StateFile;

/// Hierarchy CLI application
#[derive(Parser)]
#[command(name = "hierarchy")]
#[command(about = "Hierarchy - capacity-bounded member tree with pay-to-join admission", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "HIERARCHY_CONFIG")]
    config: Option<PathBuf>,

    /// State file path (overrides the config)
    #[arg(short, long, env = "HIERARCHY_STATE")]
    state: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Membership(membership::MembershipCommands),

    #[command(flatten)]
    Query(query::QueryCommands),

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(&config, cli.verbose);

    let state = StateFile::new(cli.state.clone().unwrap_or_else(|| config.state.path.clone()));
    tracing::debug!(state = %state.path().display(), "Using state file");

    match cli.command {
        Commands::Membership(command) => membership::execute(command, &config, &state, cli.output),
        Commands::Query(command) => query::execute(command, &state, cli.output),
        Commands::Config => {
            println!("State: {}", state.path().display());
            println!("Config: {:?}", config);
            Ok(())
        }
    }
}

fn init_tracing(config: &CliConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_level.into());

    let json = config.logging.json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| {
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr)
        }))
        .init();
}
