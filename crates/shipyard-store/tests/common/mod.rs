use serde_json::{json, Value};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Fixed base time so mtimes never depend on how fast the test runs
#[allow(dead_code)]
pub fn base_time() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

/// Build snapshot compiling the given units, each in its own source file
#[allow(dead_code)]
pub fn snapshot_with_units(version: &str, units: &[&str]) -> Value {
    let mut sources = serde_json::Map::new();
    let mut contracts = serde_json::Map::new();
    for unit in units {
        let source = format!("contracts/{}.sol", unit);
        sources.insert(
            source.clone(),
            json!({ "content": format!("// SPDX-License-Identifier: MIT\ncontract {} {{}}\n", unit) }),
        );
        contracts.insert(source, json!({ *unit: { "abi": [] } }));
    }
    json!({
        "solcLongVersion": version,
        "input": {
            "language": "Solidity",
            "sources": sources,
            "settings": { "optimizer": { "enabled": true, "runs": 200 } }
        },
        "output": { "contracts": contracts }
    })
}

/// Write a snapshot file and pin its modification time
#[allow(dead_code)]
pub fn write_snapshot(dir: &Path, name: &str, snapshot: &Value, modified: SystemTime) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec_pretty(snapshot).unwrap()).unwrap();
    set_mtime(&path, modified);
    path
}

#[allow(dead_code)]
pub fn set_mtime(path: &Path, modified: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
}
