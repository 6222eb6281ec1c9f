#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{base_time, snapshot_with_units, write_snapshot};
use sha2::{Digest, Sha256};
use shipyard_core::{ExErrorKind, Stage};
use shipyard_store::{emit_bundle, extract_unit, BundleOptions, ExtractedUnit};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn extracted_token(build_dir: &Path) -> ExtractedUnit {
    write_snapshot(
        build_dir,
        "build.json",
        &snapshot_with_units("0.8.20+commit.a1b79de6", &["HelivaultToken"]),
        base_time(),
    );
    extract_unit(build_dir, "HelivaultToken").unwrap()
}

#[test]
fn test_invalid_address_leaves_output_untouched() {
    // Given an output directory holding a previous bundle
    let root = TempDir::new().unwrap();
    let extracted = extracted_token(&root.path().join("build-info"));
    let output_dir = root.path().join("output");
    fs::create_dir_all(&output_dir).unwrap();
    fs::write(output_dir.join("Lottery-verify-input.json"), "{}").unwrap();
    let options = BundleOptions {
        output_dir: output_dir.clone(),
        ..BundleOptions::default()
    };

    for bad in ["0x1234", "not-an-address", "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD"] {
        // When
        let err = emit_bundle(&extracted, bad, &options).unwrap_err();

        // Then
        assert_eq!(err.kind(), ExErrorKind::InvalidAddress);
        assert_eq!(err.stage(), Some(Stage::Bundle));
    }
    let remaining: Vec<_> = fs::read_dir(&output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(remaining, vec!["Lottery-verify-input.json".to_string()]);
}

#[test]
fn test_valid_address_replaces_previous_bundle() {
    let root = TempDir::new().unwrap();
    let extracted = extracted_token(&root.path().join("build-info"));
    let output_dir = root.path().join("output");
    fs::create_dir_all(&output_dir).unwrap();
    fs::write(output_dir.join("Lottery-verify-input.json"), "{}").unwrap();
    let options = BundleOptions {
        output_dir: output_dir.clone(),
        ..BundleOptions::default()
    };

    let report = emit_bundle(
        &extracted,
        "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        &options,
    )
    .unwrap();

    let mut names: Vec<_> = fs::read_dir(&output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "HelivaultToken-verify-input.json".to_string(),
            "HelivaultToken-verify-tutorial.md".to_string(),
        ]
    );

    // Input document is the snapshot's compiler input, verbatim
    let written = fs::read(&report.input_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&written).unwrap();
    assert_eq!(parsed, extracted.compiler_input);
    assert_eq!(report.input_digest, hex::encode(Sha256::digest(&written)));

    let guide = fs::read_to_string(&report.guide_path).unwrap();
    assert!(guide.contains(
        "https://explorer.helioschainlabs.org/address/0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
    ));
    assert!(guide.contains("Standard-Json-Input"));
}
