#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{base_time, set_mtime, snapshot_with_units, write_snapshot};
use serde_json::json;
use shipyard_core::{ExErrorKind, Stage};
use shipyard_store::artifacts::latest_snapshot;
use shipyard_store::{extract_unit, list_units};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_newest_snapshot_wins_regardless_of_name() {
    // Given three snapshots whose names sort opposite to their mtimes
    let dir = TempDir::new().unwrap();
    let t = base_time();
    write_snapshot(dir.path(), "c.json", &snapshot_with_units("0.8.17", &["Token"]), t);
    write_snapshot(
        dir.path(),
        "b.json",
        &snapshot_with_units("0.8.19", &["Token"]),
        t + Duration::from_secs(10),
    );
    let newest = write_snapshot(
        dir.path(),
        "a.json",
        &snapshot_with_units("0.8.20", &["Token"]),
        t + Duration::from_secs(20),
    );

    // When
    let extracted = extract_unit(dir.path(), "Token").unwrap();

    // Then
    assert_eq!(extracted.snapshot_path, newest);
    assert_eq!(extracted.compiler_version, "0.8.20");
    assert_eq!(
        extracted.compiler_input["settings"]["optimizer"]["runs"],
        json!(200)
    );
    assert_eq!(extracted.source, "contracts/Token.sol");
    assert_eq!(extracted.license.as_deref(), Some("MIT"));
}

#[test]
fn test_selection_follows_touched_file() {
    let dir = TempDir::new().unwrap();
    let t = base_time();
    let older = write_snapshot(dir.path(), "one.json", &snapshot_with_units("0.8.1", &["A"]), t);
    write_snapshot(
        dir.path(),
        "two.json",
        &snapshot_with_units("0.8.2", &["A"]),
        t + Duration::from_secs(5),
    );
    assert_eq!(extract_unit(dir.path(), "A").unwrap().compiler_version, "0.8.2");

    // Recompiling rewrites an older file; no cached choice survives
    set_mtime(&older, t + Duration::from_secs(60));

    assert_eq!(extract_unit(dir.path(), "A").unwrap().compiler_version, "0.8.1");
}

#[test]
fn test_equal_mtimes_pick_greatest_path() {
    let dir = TempDir::new().unwrap();
    let t = base_time();
    write_snapshot(dir.path(), "aaa.json", &snapshot_with_units("0.8.1", &["A"]), t);
    let zzz = write_snapshot(dir.path(), "zzz.json", &snapshot_with_units("0.8.2", &["A"]), t);

    assert_eq!(latest_snapshot(dir.path()).unwrap(), zzz);
}

#[test]
fn test_empty_directory_has_no_artifacts() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.txt"), "not a snapshot").unwrap();

    let err = extract_unit(dir.path(), "Token").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NoArtifactsFound);
    assert_eq!(err.stage(), Some(Stage::Artifacts));
}

#[test]
fn test_missing_directory_has_no_artifacts() {
    let dir = TempDir::new().unwrap();

    let err = list_units(&dir.path().join("build-info")).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NoArtifactsFound);
}

#[test]
fn test_unit_absent_from_latest_snapshot() {
    // Staking only exists in the older snapshot
    let dir = TempDir::new().unwrap();
    let t = base_time();
    write_snapshot(dir.path(), "old.json", &snapshot_with_units("0.8.1", &["Staking"]), t);
    write_snapshot(
        dir.path(),
        "new.json",
        &snapshot_with_units("0.8.2", &["Token"]),
        t + Duration::from_secs(1),
    );

    let err = extract_unit(dir.path(), "Staking").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::UnitNotCompiled);
    assert_eq!(err.unit(), Some("Staking"));
}

#[test]
fn test_malformed_snapshot_is_invalid() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{\"input\": ").unwrap();

    let err = extract_unit(dir.path(), "Token").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
    assert!(err.message().contains("broken.json"));
}

#[test]
fn test_list_units_is_sorted() {
    let dir = TempDir::new().unwrap();
    write_snapshot(
        dir.path(),
        "build.json",
        &snapshot_with_units("0.8.20", &["QuantumRelics", "HelivaultToken", "Lottery"]),
        base_time(),
    );

    assert_eq!(
        list_units(dir.path()).unwrap(),
        vec!["HelivaultToken", "Lottery", "QuantumRelics"]
    );
}
