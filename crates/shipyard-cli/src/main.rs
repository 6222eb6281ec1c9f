//! Shipyard CLI
//!
//! Deploys a plan of interdependent on-chain units, keeps the deployment
//! ledger, runs post-deploy wiring and prepares explorer verification bundles.

use clap::{Parser, Subcommand};
use shipyard_core::logging_facility::{init, Profile};

mod chain;
mod commands;

#[derive(Debug, Parser)]
#[command(name = "shipyard")]
#[command(about = "Shipyard - ordered deployments with a mergeable ledger", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Deploy the plan's units in order
    Deploy(commands::deploy::DeployArgs),
    /// Run the plan's post-deploy wiring steps
    Wire(commands::wire::WireArgs),
    /// Resolve the plan against the ledger without touching the chain
    Check(commands::check::CheckArgs),
    /// Build the verification bundle for a deployed unit
    Verify(commands::verify::VerifyArgs),
    /// Inspect the deployment ledger
    Ledger(commands::ledger::LedgerArgs),
}

fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Deploy(args) => commands::deploy::execute(args),
        Commands::Wire(args) => commands::wire::execute(args),
        Commands::Check(args) => commands::check::execute(args),
        Commands::Verify(args) => commands::verify::execute(args),
        Commands::Ledger(args) => commands::ledger::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
