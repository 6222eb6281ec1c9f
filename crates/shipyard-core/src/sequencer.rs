//! Deployment sequencer
//!
//! Deploys units in the declared order. Each unit's references are resolved
//! against the records produced earlier in the run plus the preloaded
//! ledger. The first failure stops the run; whatever was already deployed is
//! kept in the report so the caller can still persist it.

use serde::Serialize;
use std::collections::HashSet;
use std::time::Instant;

use crate::chain::ChainClient;
use crate::errors::{ExError, Result, ShipyardError, Stage};
use crate::model::{Address, ArgSpec, ArgValue, DeploymentRecord, Ledger, UnitDescriptor};
use crate::resolve::{needs_deployer, parse_ether_amount, resolve_args, LayeredBook, ResolveScope};
use crate::{log_op_end, log_op_error, log_op_start};

/// Which units a run touches
#[derive(Debug, Clone, Default)]
pub struct SequenceOptions {
    /// Restrict the run to these units (empty means every unit in the plan)
    pub only: Vec<String>,
    /// Deploy selected units again even when the ledger already has them
    pub redeploy: bool,
}

impl SequenceOptions {
    fn selects(&self, unit: &str) -> bool {
        self.only.is_empty() || self.only.iter().any(|u| u == unit)
    }
}

/// What happened to one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DeployEvent {
    Deployed {
        unit: String,
        artifact: String,
        address: Address,
        args: Vec<ArgValue>,
    },
    /// Already recorded in the ledger; no chain call was made
    Reused {
        unit: String,
        address: Address,
        /// Declared literal or ether arguments no longer match the record
        args_changed: bool,
    },
}

impl DeployEvent {
    pub fn unit(&self) -> &str {
        match self {
            DeployEvent::Deployed { unit, .. } | DeployEvent::Reused { unit, .. } => unit,
        }
    }
}

/// Outcome of a sequencing run
///
/// `deployed` holds only records confirmed during this run, even when
/// `error` is set.
#[derive(Debug, Clone, Default)]
pub struct SequenceReport {
    pub deployed: Ledger,
    pub events: Vec<DeployEvent>,
    pub error: Option<ExError>,
}

impl SequenceReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

fn check_selection(units: &[UnitDescriptor], options: &SequenceOptions) -> Result<()> {
    for name in &options.only {
        if !units.iter().any(|u| &u.name == name) {
            return Err(ExError::from(ShipyardError::InvalidPlan {
                reason: format!("unit '{}' is not declared in the plan", name),
            })
            .with_op("select_units"));
        }
    }
    Ok(())
}

/// Deploy `units` in order against `chain`
pub fn sequence(
    units: &[UnitDescriptor],
    ledger: &Ledger,
    chain: &mut dyn ChainClient,
    options: &SequenceOptions,
) -> SequenceReport {
    let start = Instant::now();
    log_op_start!("sequence", unit_count = units.len());

    let mut report = SequenceReport::default();
    if let Err(err) = check_selection(units, options) {
        log_op_error!("sequence", err, duration_ms = start.elapsed().as_millis() as u64);
        report.error = Some(err);
        return report;
    }

    let mut deployer: Option<Address> = None;

    for unit in units.iter().filter(|u| options.selects(&u.name)) {
        if !options.redeploy {
            if let Some(existing) = ledger.get(&unit.name) {
                let args_changed = args_changed(unit, &existing.args);
                if args_changed {
                    tracing::warn!(
                        unit = %unit.name,
                        address = %existing.address,
                        "declared arguments differ from the recorded deployment; reusing anyway"
                    );
                } else {
                    tracing::info!(unit = %unit.name, address = %existing.address, "reusing recorded unit");
                }
                report.events.push(DeployEvent::Reused {
                    unit: unit.name.clone(),
                    address: existing.address.clone(),
                    args_changed,
                });
                continue;
            }
        }

        match deploy_unit(unit, ledger, &report.deployed, &mut deployer, chain) {
            Ok((address, args)) => {
                tracing::info!(unit = %unit.name, address = %address, "unit deployed");
                report.deployed.insert(
                    unit.name.clone(),
                    DeploymentRecord::new(address.clone(), args.clone()),
                );
                report.events.push(DeployEvent::Deployed {
                    unit: unit.name.clone(),
                    artifact: unit.artifact().to_string(),
                    address,
                    args,
                });
            }
            Err(err) => {
                log_op_error!(
                    "sequence",
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    unit = %unit.name
                );
                report.error = Some(err);
                return report;
            }
        }
    }

    log_op_end!(
        "sequence",
        duration_ms = start.elapsed().as_millis() as u64,
        deployed = report.deployed.len()
    );
    report
}

/// Compare what can be known before resolution: argument count, literals
/// and ether amounts. References and the deployer are not re-resolved.
fn args_changed(unit: &UnitDescriptor, recorded: &[ArgValue]) -> bool {
    unit.args.len() != recorded.len()
        || unit.args.iter().zip(recorded).any(|(spec, value)| match spec {
            ArgSpec::Literal(declared) => declared != value,
            ArgSpec::Ether { ether } => parse_ether_amount(ether)
                .map(ArgValue::decimal)
                .map_or(true, |wei| &wei != value),
            ArgSpec::Ref { .. } | ArgSpec::Deployer { .. } => false,
        })
}

fn deploy_unit(
    unit: &UnitDescriptor,
    ledger: &Ledger,
    current: &Ledger,
    deployer: &mut Option<Address>,
    chain: &mut dyn ChainClient,
) -> Result<(Address, Vec<ArgValue>)> {
    if deployer.is_none() && needs_deployer(&unit.args) {
        let address = chain
            .deployer()
            .map_err(|e| deploy_failure(unit, format!("cannot determine deployer: {}", e)))?;
        *deployer = Some(address);
    }

    let book = LayeredBook {
        current,
        base: ledger,
    };
    let scope = ResolveScope {
        owner: &unit.name,
        stage: Stage::Sequence,
        deployer: deployer.as_ref(),
    };
    let args = resolve_args(&unit.args, &book, &scope)?;

    tracing::debug!(unit = %unit.name, artifact = unit.artifact(), "submitting deployment");
    let address = chain
        .deploy(unit.artifact(), &args)
        .map_err(|e| deploy_failure(unit, e.to_string()))?;

    Ok((address, args))
}

fn deploy_failure(unit: &UnitDescriptor, reason: String) -> ExError {
    ExError::from(ShipyardError::DeployFailure {
        unit: unit.name.clone(),
        reason,
    })
    .with_op("deploy_unit")
}

/// Planned action for one unit, as computed by [`check_sequence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedAction {
    Deploy,
    Reuse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub unit: String,
    pub action: PlannedAction,
    /// Declared arguments, rendered for display
    pub args: Vec<String>,
}

/// Dry resolution pass: verify every reference would resolve, without any
/// chain calls
pub fn check_sequence(
    units: &[UnitDescriptor],
    ledger: &Ledger,
    options: &SequenceOptions,
) -> Result<Vec<PlannedStep>> {
    check_selection(units, options)?;

    let mut known: HashSet<&str> = ledger.units().collect();
    let mut steps = Vec::new();

    for unit in units.iter().filter(|u| options.selects(&u.name)) {
        let action = if ledger.contains(&unit.name) && !options.redeploy {
            PlannedAction::Reuse
        } else {
            for spec in &unit.args {
                match spec {
                    ArgSpec::Ref { reference } if !known.contains(reference.unit()) => {
                        return Err(ExError::from(ShipyardError::UnresolvedDependency {
                            unit: unit.name.clone(),
                            reference: reference.to_string(),
                        })
                        .with_stage(Stage::Sequence)
                        .with_op("check_sequence"));
                    }
                    ArgSpec::Ether { ether } => {
                        parse_ether_amount(ether)?;
                    }
                    _ => {}
                }
            }
            PlannedAction::Deploy
        };

        known.insert(unit.name.as_str());
        steps.push(PlannedStep {
            unit: unit.name.clone(),
            action,
            args: unit.args.iter().map(ToString::to_string).collect(),
        });
    }

    Ok(steps)
}
