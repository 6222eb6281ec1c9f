//! Ledger persistence
//!
//! The ledger is a single pretty-printed JSON document keyed by unit name.
//! A missing file is an empty ledger; anything unparsable is corrupt and is
//! never silently replaced.

use shipyard_core::errors::Stage;
use shipyard_core::{log_op_end, log_op_error, log_op_start, merge, Ledger};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::atomic::atomic_write;
use crate::errors::{in_stage, io_error, ledger_corrupt, serialization_error, Result};

pub const DEFAULT_LEDGER_FILE: &str = "deployments.json";

#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted ledger, or an empty one if the file does not exist
    pub fn load(&self) -> Result<Ledger> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no ledger file yet, starting empty");
                return Ok(Ledger::new());
            }
            Err(e) => return Err(io_error("ledger_read", e).with_stage(Stage::Ledger)),
        };

        serde_json::from_str(&content).map_err(|e| ledger_corrupt(&self.path, e.to_string()))
    }

    /// Write the full ledger atomically
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let start = Instant::now();
        log_op_start!("ledger_save", unit_count = ledger.len());

        let result = serde_json::to_string_pretty(ledger)
            .map_err(|e| serialization_error("ledger_serialize", e))
            .and_then(|mut json| {
                json.push('\n');
                atomic_write(&self.path, json.as_bytes())
            })
            .map_err(|e| in_stage(e, Stage::Ledger));

        match &result {
            Ok(()) => log_op_end!(
                "ledger_save",
                duration_ms = start.elapsed().as_millis() as u64,
                path = %self.path.display()
            ),
            Err(err) => log_op_error!(
                "ledger_save",
                err,
                duration_ms = start.elapsed().as_millis() as u64
            ),
        }
        result
    }

    /// Reload from disk, overlay `updates`, and write the result back
    ///
    /// Reloading right before the write keeps records another step of the
    /// same process wrote in the meantime. Returns the merged ledger.
    pub fn merge_and_save(&self, updates: &Ledger) -> Result<Ledger> {
        let existing = self.load()?;
        let merged = merge(&existing, updates);
        self.save(&merged)?;
        Ok(merged)
    }
}
