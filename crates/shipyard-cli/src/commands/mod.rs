//! Subcommands and the options they share

pub mod check;
pub mod deploy;
pub mod ledger;
pub mod verify;
pub mod wire;

use clap::Args;
use serde::Serialize;
use shipyard_core::errors::{ExError, ExErrorKind};
use shipyard_core::{DeployPlan, Result};
use shipyard_store::{parse_plan_file, LedgerFile};
use std::path::PathBuf;

use crate::chain::CommandChain;

#[derive(Debug, Args)]
pub struct PlanOpts {
    /// Deploy plan (YAML)
    #[arg(long, env = "SHIPYARD_PLAN", default_value = "shipyard.yaml")]
    pub plan: PathBuf,

    /// Deployment ledger file
    #[arg(long, env = "SHIPYARD_LEDGER", default_value = shipyard_store::DEFAULT_LEDGER_FILE)]
    pub ledger: PathBuf,
}

impl PlanOpts {
    pub fn load_plan(&self) -> Result<DeployPlan> {
        parse_plan_file(&self.plan)
    }

    pub fn ledger_file(&self) -> LedgerFile {
        LedgerFile::new(&self.ledger)
    }
}

#[derive(Debug, Args)]
pub struct ChainOpts {
    /// Program that submits and confirms transactions
    #[arg(long, env = "SHIPYARD_CHAIN_CMD")]
    pub chain_cmd: String,
}

impl ChainOpts {
    pub fn open(&self) -> Result<CommandChain> {
        CommandChain::from_command_line(&self.chain_cmd).map_err(|e| {
            ExError::new(ExErrorKind::Internal)
                .with_op("open_chain")
                .with_message(e.to_string())
        })
    }
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("render_json")
            .with_message(e.to_string())
    })?;
    println!("{}", json);
    Ok(())
}
