//! Dry run: resolve the whole plan against the ledger without a chain.

use serde::Serialize;
use shipyard_core::errors::{ExError, ShipyardError, Stage};
use shipyard_core::sequencer::PlannedStep;
use shipyard_core::{check_sequence, DeployPlan, Ledger, SequenceOptions};
use shipyard_store::errors::Result;
use shipyard_store::LedgerFile;
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub steps: Vec<PlannedStep>,
    pub wiring_steps: usize,
}

pub fn check_plan(
    plan: &DeployPlan,
    ledger_file: &LedgerFile,
    options: &SequenceOptions,
) -> Result<CheckOutcome> {
    let ledger = ledger_file.load()?;
    let steps = check_sequence(&plan.units, &ledger, options)?;
    check_wiring(plan, &ledger)?;

    Ok(CheckOutcome {
        steps,
        wiring_steps: plan.wiring.len(),
    })
}

/// Wiring runs against the final ledger: every plan unit plus whatever is
/// already recorded
fn check_wiring(plan: &DeployPlan, ledger: &Ledger) -> Result<()> {
    let known: HashSet<&str> = ledger
        .units()
        .chain(plan.units.iter().map(|u| u.name.as_str()))
        .collect();

    for step in &plan.wiring {
        let missing = std::iter::once(step.target.as_str())
            .chain(step.args.iter().filter_map(|a| a.dependency()))
            .find(|unit| !known.contains(unit));
        if let Some(unit) = missing {
            return Err(ExError::from(ShipyardError::UnresolvedDependency {
                unit: step.target.clone(),
                reference: format!("{}.address", unit),
            })
            .with_stage(Stage::Wiring)
            .with_op("check_wiring")
            .with_method(step.method.clone()));
        }
    }
    Ok(())
}
