//! Deployment ledger: unit name → deployment record
//!
//! Keys are kept sorted so that the persisted document is stable across
//! runs and diffs cleanly under version control.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::address::Address;
use crate::model::record::DeploymentRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: BTreeMap<String, DeploymentRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, unit: &str) -> Option<&DeploymentRecord> {
        self.records.get(unit)
    }

    pub fn address_of(&self, unit: &str) -> Option<&Address> {
        self.records.get(unit).map(|r| &r.address)
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.records.contains_key(unit)
    }

    /// Insert or overwrite the record for `unit`
    pub fn insert(&mut self, unit: impl Into<String>, record: DeploymentRecord) {
        self.records.insert(unit.into(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeploymentRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, DeploymentRecord)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (String, DeploymentRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Overlay `updates` onto `existing`
///
/// Every key in `updates` takes the updated record; keys only in `existing`
/// are carried over unchanged.
pub fn merge(existing: &Ledger, updates: &Ledger) -> Ledger {
    let mut merged = existing.clone();
    for (unit, record) in updates.iter() {
        merged.insert(unit, record.clone());
    }
    merged
}
