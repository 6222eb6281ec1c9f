//! Post-deploy wiring engine
//!
//! Runs setter calls strictly in the declared order against the final
//! ledger. A later instruction may rely on the on-chain effect of an earlier
//! one, so every call is confirmed before the next is issued and the first
//! failure stops the run. Nothing is undone.

use serde::Serialize;
use std::time::Instant;

use crate::chain::ChainClient;
use crate::errors::{ExError, Result, ShipyardError, Stage};
use crate::model::{Address, ArgValue, Ledger, WiringInstruction};
use crate::resolve::{needs_deployer, resolve_args, ResolveScope};
use crate::{log_op_end, log_op_error, log_op_start};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WiringEvent {
    Applied {
        target: String,
        address: Address,
        method: String,
        args: Vec<ArgValue>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct WiringReport {
    pub events: Vec<WiringEvent>,
    pub error: Option<ExError>,
}

impl WiringReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn applied(&self) -> usize {
        self.events.len()
    }
}

/// Apply `instructions` in order
pub fn wire(
    ledger: &Ledger,
    instructions: &[WiringInstruction],
    chain: &mut dyn ChainClient,
) -> WiringReport {
    let start = Instant::now();
    log_op_start!("wire", step_count = instructions.len());

    let mut report = WiringReport::default();
    let mut deployer: Option<Address> = None;

    for (step, instruction) in instructions.iter().enumerate() {
        match apply_instruction(instruction, ledger, &mut deployer, chain) {
            Ok(event) => {
                tracing::info!(
                    unit = %instruction.target,
                    method = %instruction.method,
                    step = step + 1,
                    "setter confirmed"
                );
                report.events.push(event);
            }
            Err(err) => {
                log_op_error!(
                    "wire",
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    unit = %instruction.target,
                    method = %instruction.method
                );
                report.error = Some(err);
                return report;
            }
        }
    }

    log_op_end!(
        "wire",
        duration_ms = start.elapsed().as_millis() as u64,
        applied = report.applied()
    );
    report
}

fn apply_instruction(
    instruction: &WiringInstruction,
    ledger: &Ledger,
    deployer: &mut Option<Address>,
    chain: &mut dyn ChainClient,
) -> Result<WiringEvent> {
    let target = ledger.address_of(&instruction.target).ok_or_else(|| {
        ExError::from(ShipyardError::UnresolvedDependency {
            unit: instruction.target.clone(),
            reference: format!("{}.address", instruction.target),
        })
        .with_stage(Stage::Wiring)
        .with_op("resolve_target")
        .with_method(instruction.method.clone())
    })?;

    if deployer.is_none() && needs_deployer(&instruction.args) {
        let address = chain.deployer().map_err(|e| {
            wiring_failure(instruction, format!("cannot determine deployer: {}", e))
        })?;
        *deployer = Some(address);
    }

    let scope = ResolveScope {
        owner: &instruction.target,
        stage: Stage::Wiring,
        deployer: deployer.as_ref(),
    };
    let args = resolve_args(&instruction.args, ledger, &scope)
        .map_err(|e| e.with_method(instruction.method.clone()))?;

    chain
        .call(target, &instruction.method, &args)
        .map_err(|e| wiring_failure(instruction, e.to_string()))?;

    Ok(WiringEvent::Applied {
        target: instruction.target.clone(),
        address: target.clone(),
        method: instruction.method.clone(),
        args,
    })
}

fn wiring_failure(instruction: &WiringInstruction, reason: String) -> ExError {
    ExError::from(ShipyardError::WiringFailure {
        unit: instruction.target.clone(),
        method: instruction.method.clone(),
        reason,
    })
    .with_op("call_setter")
}
