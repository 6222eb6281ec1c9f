//! Wiring orchestration: load the final ledger and run the plan's setters.

use serde::Serialize;
use shipyard_core::errors::ExError;
use shipyard_core::{wire, ChainClient, DeployPlan, WiringEvent};
use shipyard_core_types::{RunContext, RunId};
use shipyard_store::errors::Result;
use shipyard_store::LedgerFile;

#[derive(Debug, Clone, Serialize)]
pub struct WireOutcome {
    pub run_id: RunId,
    pub events: Vec<WiringEvent>,
    #[serde(skip)]
    pub error: Option<ExError>,
}

impl WireOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

pub fn wire_plan(
    plan: &DeployPlan,
    ledger_file: &LedgerFile,
    chain: &mut dyn ChainClient,
    run: &RunContext,
) -> Result<WireOutcome> {
    let span = tracing::info_span!("wire", run_id = %run.run_id);
    let _guard = span.enter();

    let ledger = ledger_file
        .load()
        .map_err(|e| e.with_run_id(run.run_id.clone()))?;

    if plan.wiring.is_empty() {
        tracing::info!("plan declares no wiring steps");
    }
    let report = wire(&ledger, &plan.wiring, chain);

    Ok(WireOutcome {
        run_id: run.run_id.clone(),
        events: report.events,
        error: report.error.map(|e| e.with_run_id(run.run_id.clone())),
    })
}
