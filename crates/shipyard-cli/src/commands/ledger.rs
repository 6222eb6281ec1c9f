//! Ledger inspection
//!
//! Usage: shipyard ledger show [--json]
//!        shipyard ledger get <UNIT>

use clap::{Args, Subcommand};
use shipyard_core::errors::{ExError, ExErrorKind, Stage};
use shipyard_core::Result;
use shipyard_store::LedgerFile;
use std::path::PathBuf;

use crate::commands::print_json;

#[derive(Debug, Args)]
pub struct LedgerArgs {
    /// Deployment ledger file
    #[arg(long, env = "SHIPYARD_LEDGER", default_value = shipyard_store::DEFAULT_LEDGER_FILE, global = true)]
    pub ledger: PathBuf,

    #[command(subcommand)]
    pub command: LedgerCommand,
}

#[derive(Debug, Subcommand)]
pub enum LedgerCommand {
    /// List every recorded unit
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Print one unit's address
    Get { unit: String },
}

pub fn execute(args: LedgerArgs) -> Result<()> {
    let ledger = LedgerFile::new(&args.ledger).load()?;

    match args.command {
        LedgerCommand::Show { json: true } => print_json(&ledger),
        LedgerCommand::Show { json: false } => {
            if ledger.is_empty() {
                println!("ledger {} is empty", args.ledger.display());
            }
            for (unit, record) in ledger.iter() {
                let rendered: Vec<String> = record.args.iter().map(ToString::to_string).collect();
                println!("{:<20} {}  [{}]", unit, record.address, rendered.join(", "));
            }
            Ok(())
        }
        LedgerCommand::Get { unit } => match ledger.address_of(&unit) {
            Some(address) => {
                println!("{}", address);
                Ok(())
            }
            None => Err(ExError::new(ExErrorKind::UnresolvedDependency)
                .with_stage(Stage::Ledger)
                .with_op("ledger_get")
                .with_unit(unit.clone())
                .with_message(format!("{} is not recorded in the ledger", unit))),
        },
    }
}
