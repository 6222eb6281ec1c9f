//! Verification pipeline: latest snapshot → unit input → bundle.

use shipyard_core_types::RunContext;
use shipyard_store::errors::Result;
use shipyard_store::{emit_bundle, extract_unit, list_units, BundleReport};

use crate::commands::engine_command::VerifySources;

/// Units the operator can pick from, in menu order
pub fn compiled_units(sources: &VerifySources) -> Result<Vec<String>> {
    list_units(&sources.build_info_dir)
}

pub fn verify(
    sources: &VerifySources,
    unit: &str,
    address: &str,
    run: &RunContext,
) -> Result<BundleReport> {
    let span = tracing::info_span!("verify", run_id = %run.run_id, unit = unit);
    let _guard = span.enter();

    let extracted = extract_unit(&sources.build_info_dir, unit)
        .map_err(|e| e.with_run_id(run.run_id.clone()))?;
    emit_bundle(&extracted, address, &sources.bundle)
        .map_err(|e| e.with_run_id(run.run_id.clone()))
}
