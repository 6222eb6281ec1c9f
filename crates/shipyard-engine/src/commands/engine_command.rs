//! Engine-level commands.

use shipyard_core::{ChainClient, DeployPlan, SequenceOptions};
use shipyard_core_types::RunContext;
use shipyard_store::errors::Result;
use shipyard_store::{BundleOptions, BundleReport, LedgerFile};
use std::path::PathBuf;

use crate::commands::check::CheckOutcome;
use crate::commands::deploy::DeployOutcome;
use crate::commands::wire::WireOutcome;

/// Inputs of the verification pipeline; it never reads the ledger
#[derive(Debug, Clone)]
pub struct VerifySources {
    /// Directory of compiler build snapshots
    pub build_info_dir: PathBuf,
    pub bundle: BundleOptions,
}

/// Where a run reads and writes its state
#[derive(Debug, Clone)]
pub struct Workspace {
    pub ledger: LedgerFile,
    pub verify: VerifySources,
}

/// Engine-level commands that require I/O.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Deploy the plan's units and merge the results into the ledger.
    Deploy {
        plan: DeployPlan,
        options: SequenceOptions,
    },
    /// Run the plan's wiring steps against the ledger.
    Wire { plan: DeployPlan },
    /// Resolve the plan against the ledger without touching the chain.
    Check {
        plan: DeployPlan,
        options: SequenceOptions,
    },
    /// Emit the verification bundle for one deployed unit.
    Verify { unit: String, address: String },
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Deploy(DeployOutcome),
    Wire(WireOutcome),
    Check(CheckOutcome),
    Verify(BundleReport),
}

/// Apply an engine command.
pub fn apply_engine_command(
    cmd: EngineCommand,
    workspace: &Workspace,
    chain: &mut dyn ChainClient,
    run: &RunContext,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Deploy { plan, options } => {
            crate::commands::deploy::deploy(&plan, &workspace.ledger, chain, &options, run)
                .map(EngineCommandResult::Deploy)
        }
        EngineCommand::Wire { plan } => {
            crate::commands::wire::wire_plan(&plan, &workspace.ledger, chain, run)
                .map(EngineCommandResult::Wire)
        }
        EngineCommand::Check { plan, options } => {
            crate::commands::check::check_plan(&plan, &workspace.ledger, &options)
                .map(EngineCommandResult::Check)
        }
        EngineCommand::Verify { unit, address } => {
            crate::commands::verify::verify(&workspace.verify, &unit, &address, run)
                .map(EngineCommandResult::Verify)
        }
    }
}
