//! Plan parser with validation
//!
//! Parses YAML and validates schema version, unit name uniqueness, ether
//! amounts and wiring steps. Reference resolution needs the ledger and is
//! left to `check_sequence`.

use shipyard_core::errors::Stage;
use shipyard_core::model::plan::PLAN_SCHEMA_VERSION;
use shipyard_core::resolve::parse_ether_amount;
use shipyard_core::{ArgSpec, DeployPlan};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::{in_stage, invalid_plan, io_error, Result};

/// Parse a plan file from a path
pub fn parse_plan_file(path: &Path) -> Result<DeployPlan> {
    let content = fs::read_to_string(path)
        .map_err(|e| io_error("plan_read", e).with_stage(Stage::Plan))?;

    parse_plan_str(&content)
}

/// Parse a plan from a YAML string
pub fn parse_plan_str(content: &str) -> Result<DeployPlan> {
    let plan: DeployPlan = serde_yaml::from_str(content)
        .map_err(|e| invalid_plan(format!("YAML parse error: {}", e)))?;

    validate_plan(&plan)?;

    tracing::debug!(
        units = plan.units.len(),
        wiring = plan.wiring.len(),
        "plan parsed"
    );
    Ok(plan)
}

/// Validate a parsed plan
pub fn validate_plan(plan: &DeployPlan) -> Result<()> {
    if plan.schema_version != PLAN_SCHEMA_VERSION {
        return Err(invalid_plan(format!(
            "Unsupported schema_version: {}. Expected {}",
            plan.schema_version, PLAN_SCHEMA_VERSION
        )));
    }

    let mut names = HashSet::new();
    for unit in &plan.units {
        if unit.name.trim().is_empty() {
            return Err(invalid_plan("Unit name must not be empty"));
        }
        if !names.insert(unit.name.as_str()) {
            return Err(invalid_plan(format!("Duplicate unit name {}", unit.name)));
        }
        if matches!(&unit.artifact, Some(a) if a.trim().is_empty()) {
            return Err(invalid_plan(format!(
                "Unit {} declares an empty artifact name",
                unit.name
            )));
        }
        check_ether_args(&unit.args)
            .map_err(|e| in_stage(e.with_unit(unit.name.clone()), Stage::Plan))?;
    }

    for (index, step) in plan.wiring.iter().enumerate() {
        if step.target.trim().is_empty() {
            return Err(invalid_plan(format!(
                "Wiring step {} has an empty target",
                index + 1
            )));
        }
        if step.method.trim().is_empty() {
            return Err(invalid_plan(format!(
                "Wiring step {} on {} has an empty method",
                index + 1,
                step.target
            )));
        }
        check_ether_args(&step.args).map_err(|e| {
            in_stage(
                e.with_unit(step.target.clone())
                    .with_method(step.method.clone()),
                Stage::Plan,
            )
        })?;
    }

    Ok(())
}

fn check_ether_args(args: &[ArgSpec]) -> Result<()> {
    for arg in args {
        if let ArgSpec::Ether { ether } = arg {
            parse_ether_amount(ether)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipyard_core::ExErrorKind;

    #[test]
    fn test_rejects_unknown_schema_version() {
        let err = parse_plan_str("schema_version: 3\nunits: []\n").unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::InvalidPlan);
        assert!(err.message().contains("schema_version"));
    }

    #[test]
    fn test_rejects_bad_ether_amount() {
        let yaml = r#"
schema_version: 0
units:
  - name: Lottery
    args:
      - { ether: "lots" }
"#;
        let err = parse_plan_str(yaml).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::InvalidPlan);
        assert_eq!(err.unit(), Some("Lottery"));
        assert_eq!(err.stage(), Some(Stage::Plan));
    }
}
