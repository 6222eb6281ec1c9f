//! Deploy orchestration.
//!
//! 1. Load the ledger (a corrupt ledger stops the run before any chain call)
//! 2. Sequence the plan's units
//! 3. Merge whatever was confirmed into the on-disk ledger, even after a
//!    failure, so completed deployments are never lost

use serde::Serialize;
use shipyard_core::errors::ExError;
use shipyard_core::{
    log_op_end, log_op_error, log_op_start, sequence, ChainClient, DeployEvent, DeployPlan,
    Ledger, SequenceOptions,
};
use shipyard_core_types::{RunContext, RunId};
use shipyard_store::errors::Result;
use shipyard_store::LedgerFile;
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
pub struct DeployOutcome {
    pub run_id: RunId,
    pub events: Vec<DeployEvent>,
    /// Ledger as persisted at the end of the run
    #[serde(skip)]
    pub ledger: Ledger,
    /// Sequencing failure; records confirmed before it are already saved
    #[serde(skip)]
    pub error: Option<ExError>,
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

pub fn deploy(
    plan: &DeployPlan,
    ledger_file: &LedgerFile,
    chain: &mut dyn ChainClient,
    options: &SequenceOptions,
    run: &RunContext,
) -> Result<DeployOutcome> {
    let span = tracing::info_span!("deploy", run_id = %run.run_id);
    let _guard = span.enter();
    let start = Instant::now();
    log_op_start!("deploy", unit_count = plan.units.len());

    let ledger = ledger_file.load().map_err(|e| {
        log_op_error!("deploy", e, duration_ms = start.elapsed().as_millis() as u64);
        e.with_run_id(run.run_id.clone())
    })?;

    let report = sequence(&plan.units, &ledger, chain, options);

    let ledger = if report.deployed.is_empty() {
        ledger
    } else {
        match ledger_file.merge_and_save(&report.deployed) {
            Ok(merged) => merged,
            Err(save_err) => {
                let save_err = match &report.error {
                    Some(run_err) => save_err.with_source(run_err.clone()),
                    None => save_err,
                };
                log_op_error!(
                    "deploy",
                    save_err,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                return Err(save_err.with_run_id(run.run_id.clone()));
            }
        }
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    match &report.error {
        None => log_op_end!(
            "deploy",
            duration_ms = duration_ms,
            deployed = report.deployed.len()
        ),
        Some(err) => log_op_error!(
            "deploy",
            err,
            duration_ms = duration_ms,
            deployed = report.deployed.len()
        ),
    }

    Ok(DeployOutcome {
        run_id: run.run_id.clone(),
        events: report.events,
        ledger,
        error: report
            .error
            .map(|e| e.with_run_id(run.run_id.clone())),
    })
}
