//! Build snapshot document
//!
//! `{ "input": <compiler input>, "solcLongVersion": "...", "output"?: {...} }`

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::errors::{invalid_snapshot, io_error, Result};
use shipyard_core::errors::Stage;

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSnapshot {
    /// Compiler input document: language, sources, settings
    pub input: Value,

    #[serde(rename = "solcLongVersion")]
    pub compiler_version: String,

    #[serde(default)]
    pub output: Option<Value>,
}

impl BuildSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| io_error("snapshot_read", e).with_stage(Stage::Artifacts))?;
        Self::parse(&content).map_err(|reason| invalid_snapshot(path, reason))
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        let snapshot: BuildSnapshot = serde_json::from_str(content).map_err(|e| e.to_string())?;
        if !snapshot.input.is_object() {
            return Err("'input' must be an object".to_string());
        }
        Ok(snapshot)
    }

    fn contracts(&self) -> Option<&serde_json::Map<String, Value>> {
        self.output.as_ref()?.get("contracts")?.as_object()
    }

    fn source_keys(&self) -> impl Iterator<Item = &str> {
        self.input
            .get("sources")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|sources| sources.keys().map(String::as_str))
    }

    /// Source file that defines `unit`, if the snapshot compiled it
    pub fn source_of(&self, unit: &str) -> Option<&str> {
        match self.contracts() {
            Some(contracts) => contracts
                .iter()
                .find(|(_, units)| units.get(unit).is_some())
                .map(|(source, _)| source.as_str()),
            None => self.source_keys().find(|key| file_stem(key) == Some(unit)),
        }
    }

    pub fn contains_unit(&self, unit: &str) -> bool {
        self.source_of(unit).is_some()
    }

    /// Every unit name in the snapshot, sorted and de-duplicated
    pub fn unit_names(&self) -> Vec<String> {
        let names: BTreeSet<String> = match self.contracts() {
            Some(contracts) => contracts
                .values()
                .filter_map(Value::as_object)
                .flat_map(|units| units.keys().cloned())
                .collect(),
            None => self
                .source_keys()
                .filter_map(file_stem)
                .map(str::to_string)
                .collect(),
        };
        names.into_iter().collect()
    }

    /// SPDX licence identifier declared at the top of `source`
    pub fn license_of(&self, source: &str) -> Option<String> {
        let content = self
            .input
            .get("sources")?
            .get(source)?
            .get("content")?
            .as_str()?;
        spdx_identifier(content)
    }
}

fn file_stem(key: &str) -> Option<&str> {
    Path::new(key).file_stem().and_then(|s| s.to_str())
}

fn spdx_identifier(content: &str) -> Option<String> {
    const MARKER: &str = "SPDX-License-Identifier:";
    content.lines().find_map(|line| {
        let (_, rest) = line.split_once(MARKER)?;
        let id = rest.trim().trim_end_matches("*/").trim();
        (!id.is_empty()).then(|| id.to_string())
    })
}
