//! Latest-snapshot selection and unit extraction

use serde::Serialize;
use serde_json::Value;
use shipyard_core::errors::Stage;
use shipyard_core::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

use crate::artifacts::snapshot::BuildSnapshot;
use crate::errors::{io_error, no_artifacts, unit_not_compiled, Result};

/// One unit's verification inputs, taken from the latest snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedUnit {
    pub unit: String,
    pub compiler_input: Value,
    pub compiler_version: String,
    pub snapshot_path: PathBuf,
    /// Source file that defines the unit
    pub source: String,
    /// SPDX identifier declared in that source
    pub license: Option<String>,
}

struct Candidate {
    path: PathBuf,
    modified: SystemTime,
}

fn scan(dir: &Path) -> Result<Vec<Candidate>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error("scan_snapshots", e).with_stage(Stage::Artifacts)),
    };

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_error("scan_snapshots", e).with_stage(Stage::Artifacts))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let metadata = entry
            .metadata()
            .map_err(|e| io_error("stat_snapshot", e).with_stage(Stage::Artifacts))?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata
            .modified()
            .map_err(|e| io_error("stat_snapshot", e).with_stage(Stage::Artifacts))?;
        candidates.push(Candidate { path, modified });
    }
    Ok(candidates)
}

/// Path of the most recently modified snapshot in `dir`
///
/// Equal modification times go to the lexicographically greatest path.
pub fn latest_snapshot(dir: &Path) -> Result<PathBuf> {
    scan(dir)?
        .into_iter()
        .max_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.path.cmp(&b.path))
        })
        .map(|c| c.path)
        .ok_or_else(|| no_artifacts(dir))
}

/// Pull `unit`'s compiler input out of the latest snapshot in `dir`
pub fn extract_unit(dir: &Path, unit: &str) -> Result<ExtractedUnit> {
    let start = Instant::now();
    log_op_start!("extract_unit", unit = unit);

    let result = latest_snapshot(dir).and_then(|path| {
        tracing::debug!(snapshot = %path.display(), "selected latest snapshot");
        let snapshot = BuildSnapshot::load(&path)?;
        let source = snapshot
            .source_of(unit)
            .ok_or_else(|| unit_not_compiled(unit, &path))?
            .to_string();
        let license = snapshot.license_of(&source);
        Ok(ExtractedUnit {
            unit: unit.to_string(),
            compiler_input: snapshot.input,
            compiler_version: snapshot.compiler_version,
            snapshot_path: path,
            source,
            license,
        })
    });

    match &result {
        Ok(extracted) => log_op_end!(
            "extract_unit",
            duration_ms = start.elapsed().as_millis() as u64,
            unit = unit,
            snapshot = %extracted.snapshot_path.display()
        ),
        Err(err) => log_op_error!(
            "extract_unit",
            err,
            duration_ms = start.elapsed().as_millis() as u64,
            unit = unit
        ),
    }
    result
}

/// Unit names compiled in the latest snapshot, sorted
pub fn list_units(dir: &Path) -> Result<Vec<String>> {
    let path = latest_snapshot(dir)?;
    Ok(BuildSnapshot::load(&path)?.unit_names())
}
