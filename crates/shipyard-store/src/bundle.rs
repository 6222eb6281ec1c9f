//! Verification bundle emitter
//!
//! Writes the two files an operator needs to verify a deployed unit on the
//! block explorer: the compiler input as standard JSON, and a Markdown guide
//! filled in with the unit's details. The output directory is cleared first,
//! so a bundle never mixes files from two units.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use shipyard_core::errors::Stage;
use shipyard_core::model::parse_address;
use shipyard_core::{log_op_end, log_op_error, log_op_start, Address};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::artifacts::ExtractedUnit;
use crate::atomic::atomic_write;
use crate::errors::{io_error, serialization_error, Result};

pub const DEFAULT_EXPLORER_BASE: &str = "https://explorer.helioschainlabs.org";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone)]
pub struct BundleOptions {
    pub output_dir: PathBuf,
    pub explorer_base: String,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            explorer_base: DEFAULT_EXPLORER_BASE.to_string(),
        }
    }
}

/// What was written
#[derive(Debug, Clone, Serialize)]
pub struct BundleReport {
    pub unit: String,
    pub address: Address,
    pub compiler_version: String,
    pub explorer_url: String,
    pub input_path: PathBuf,
    pub guide_path: PathBuf,
    /// SHA-256 of the written input document, hex
    pub input_digest: String,
    pub snapshot_path: PathBuf,
    pub generated_at: DateTime<Utc>,
}

/// Emit the bundle for `extracted` deployed at `address`
///
/// The address is validated before the output directory is touched.
pub fn emit_bundle(
    extracted: &ExtractedUnit,
    address: &str,
    options: &BundleOptions,
) -> Result<BundleReport> {
    let start = Instant::now();
    log_op_start!("emit_bundle", unit = %extracted.unit);

    let result = parse_address(address)
        .map_err(|e| e.with_stage(Stage::Bundle).with_op("emit_bundle"))
        .and_then(|address| write_bundle(extracted, address, options));

    match &result {
        Ok(report) => log_op_end!(
            "emit_bundle",
            duration_ms = start.elapsed().as_millis() as u64,
            unit = %report.unit,
            address = %report.address
        ),
        Err(err) => log_op_error!(
            "emit_bundle",
            err,
            duration_ms = start.elapsed().as_millis() as u64,
            unit = %extracted.unit
        ),
    }
    result
}

fn write_bundle(
    extracted: &ExtractedUnit,
    address: Address,
    options: &BundleOptions,
) -> Result<BundleReport> {
    let dir = &options.output_dir;
    reset_dir(dir)?;

    let mut input_json = serde_json::to_string_pretty(&extracted.compiler_input)
        .map_err(|e| serialization_error("bundle_serialize_input", e).with_stage(Stage::Bundle))?;
    input_json.push('\n');
    let input_path = dir.join(format!("{}-verify-input.json", extracted.unit));
    atomic_write(&input_path, input_json.as_bytes())?;

    let input_digest = hex::encode(Sha256::digest(input_json.as_bytes()));
    let explorer_url = format!(
        "{}/address/{}",
        options.explorer_base.trim_end_matches('/'),
        address
    );

    let report = BundleReport {
        unit: extracted.unit.clone(),
        address,
        compiler_version: extracted.compiler_version.clone(),
        explorer_url,
        guide_path: dir.join(format!("{}-verify-tutorial.md", extracted.unit)),
        input_path,
        input_digest,
        snapshot_path: extracted.snapshot_path.clone(),
        generated_at: Utc::now(),
    };

    let guide = render_guide(&report, extracted.license.as_deref(), &options.explorer_base);
    atomic_write(&report.guide_path, guide.as_bytes())?;

    Ok(report)
}

fn reset_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(io_error("clear_output_dir", e).with_stage(Stage::Bundle)),
    }
    fs::create_dir_all(dir).map_err(|e| io_error("create_output_dir", e).with_stage(Stage::Bundle))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn render_guide(report: &BundleReport, license: Option<&str>, explorer_base: &str) -> String {
    let explorer_base = explorer_base.trim_end_matches('/');
    let license_line = match license {
        Some(id) => format!("Select `{}`, as declared in the source file.", id),
        None => "No SPDX identifier was found in the source file; pick the licence that applies."
            .to_string(),
    };

    format!(
        "# How to Verify `{unit}`\n\
         \n\
         - **Unit:** `{unit}`\n\
         - **Address:** `{address}`\n\
         - **Explorer:** [{url}]({url})\n\
         - **Compiler version:** `v{version}`\n\
         - **Input file:** `{input}` (sha256 `{digest}`)\n\
         - **Generated:** {generated}\n\
         \n\
         ## Steps\n\
         \n\
         1. **Open the verification page.** Go to the unit's page on the [explorer]({base}) \
         and choose \"Verify and Publish\" under the Contract tab.\n\
         2. **Fill in the form.**\n   \
         - Address: `{address}`\n   \
         - Compiler type: **Solidity (Standard-Json-Input)**\n   \
         - Compiler version: **v{version}**\n   \
         - Licence: {license}\n\
         3. **Upload the input.** Drop `{input}` from this directory into the upload area.\n\
         4. **Verify and publish.** Submit the form and wait for the success message.\n",
        unit = report.unit,
        address = report.address,
        url = report.explorer_url,
        version = report.compiler_version,
        input = file_name(&report.input_path),
        digest = report.input_digest,
        generated = report.generated_at.to_rfc3339(),
        base = explorer_base,
        license = license_line,
    )
}
