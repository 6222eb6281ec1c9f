//! Error handling for shipyard-store
//!
//! Thin constructors over the core error facility so every filesystem
//! failure carries its stage and operation.

use shipyard_core::errors::{ExError, ExErrorKind, ShipyardError, Stage};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

pub fn serialization_error(operation: &str, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

pub fn ledger_corrupt(path: &Path, reason: impl Into<String>) -> ExError {
    ExError::from(ShipyardError::LedgerCorrupt {
        path: path.display().to_string(),
        reason: reason.into(),
    })
    .with_op("ledger_load")
}

pub fn invalid_plan(reason: impl Into<String>) -> ExError {
    ExError::from(ShipyardError::InvalidPlan {
        reason: reason.into(),
    })
    .with_op("plan_parse")
}

pub fn no_artifacts(dir: &Path) -> ExError {
    ExError::from(ShipyardError::NoArtifactsFound {
        dir: dir.display().to_string(),
    })
    .with_op("select_snapshot")
}

pub fn unit_not_compiled(unit: &str, snapshot: &Path) -> ExError {
    ExError::from(ShipyardError::UnitNotCompiled {
        unit: unit.to_string(),
        snapshot: snapshot.display().to_string(),
    })
    .with_op("extract_unit")
}

pub fn invalid_snapshot(path: &Path, reason: impl Into<String>) -> ExError {
    ExError::from(ShipyardError::InvalidSnapshot {
        path: path.display().to_string(),
        reason: reason.into(),
    })
    .with_op("load_snapshot")
}

/// Tag an error coming out of a lower layer with the stage it surfaced in
pub fn in_stage(err: ExError, stage: Stage) -> ExError {
    if err.stage().is_some() {
        err
    } else {
        err.with_stage(stage)
    }
}
