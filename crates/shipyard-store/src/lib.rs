//! Shipyard Store - everything that touches the filesystem
//!
//! Provides:
//! - Atomic temp→rename writes
//! - The deployment ledger file (load, save, read-merge-write)
//! - Deploy plan parsing and validation (YAML, schema version 0)
//! - Build artifact selection over compiler build snapshots
//! - Verification bundle emission

pub mod artifacts;
pub mod atomic;
pub mod bundle;
pub mod errors;
pub mod ledger_file;
pub mod plan;

// Re-export key types
pub use artifacts::{extract_unit, list_units, ExtractedUnit};
pub use bundle::{emit_bundle, BundleOptions, BundleReport, DEFAULT_EXPLORER_BASE};
pub use errors::Result;
pub use ledger_file::{LedgerFile, DEFAULT_LEDGER_FILE};
pub use plan::{parse_plan_file, parse_plan_str};
