#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use shipyard_core::{Address, ArgValue, DeploymentRecord, ExErrorKind, Ledger};
use shipyard_store::LedgerFile;
use std::fs;
use tempfile::TempDir;

fn addr(digit: char) -> Address {
    Address::parse(&digit.to_string().repeat(40)).unwrap()
}

fn arb_value() -> impl Strategy<Value = ArgValue> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(ArgValue::Bool),
        any::<i64>().prop_map(ArgValue::from),
        any::<u64>().prop_map(ArgValue::from),
        // Large on-chain integers as decimal strings
        "[1-9][0-9]{20,77}".prop_map(ArgValue::Text),
        "[a-zA-Z:/._-]{0,24}".prop_map(ArgValue::Text),
    ];
    leaf.prop_recursive(2, 8, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(ArgValue::List)
    })
}

fn arb_ledger() -> impl Strategy<Value = Ledger> {
    prop::collection::vec(
        (
            "[A-Z][a-zA-Z]{0,12}",
            any::<[u8; 20]>(),
            prop::collection::vec(arb_value(), 0..4),
        ),
        0..6,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(unit, bytes, args)| {
                let address = Address::parse(&hex::encode(bytes)).unwrap();
                (unit, DeploymentRecord::new(address, args))
            })
            .collect::<Ledger>()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn save_then_load_is_identity(ledger in arb_ledger()) {
        let dir = TempDir::new().unwrap();
        let file = LedgerFile::new(dir.path().join("deployments.json"));

        file.save(&ledger).unwrap();

        prop_assert_eq!(file.load().unwrap(), ledger);
    }
}

#[test]
fn test_large_values_persist_as_decimal_strings() {
    // Given a record carrying 1e30 wei
    let dir = TempDir::new().unwrap();
    let file = LedgerFile::new(dir.path().join("deployments.json"));
    let mut ledger = Ledger::new();
    ledger.insert(
        "Lottery",
        DeploymentRecord::new(
            addr('a'),
            vec![ArgValue::Text("1000000000000000000000000000000".to_string())],
        ),
    );

    // When
    file.save(&ledger).unwrap();

    // Then the document holds a string, not a float
    let raw = fs::read_to_string(file.path()).unwrap();
    assert!(raw.contains("\"1000000000000000000000000000000\""));
    assert!(!raw.contains("e+30"));
}

#[test]
fn test_unsigned_argument_survives_reload() {
    // Given a record built from a u64 argument
    let dir = TempDir::new().unwrap();
    let file = LedgerFile::new(dir.path().join("deployments.json"));
    let mut ledger = Ledger::new();
    ledger.insert(
        "Relics",
        DeploymentRecord::new(addr('b'), vec![ArgValue::from(500u64)]),
    );

    // When
    file.save(&ledger).unwrap();

    // Then it reads back as the same value
    assert_eq!(file.load().unwrap(), ledger);
}

#[test]
fn test_float_argument_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployments.json");
    fs::write(
        &path,
        r#"{"Lottery": {"address": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "args": [1e30]}}"#,
    )
    .unwrap();

    let err = LedgerFile::new(&path).load().unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::LedgerCorrupt);
}

#[test]
fn test_bad_address_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployments.json");
    fs::write(&path, r#"{"Token": {"address": "0x1234", "args": []}}"#).unwrap();

    let err = LedgerFile::new(&path).load().unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::LedgerCorrupt);
    assert!(err.message().contains("deployments.json"));
}

#[test]
fn test_missing_args_default_to_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deployments.json");
    fs::write(
        &path,
        r#"{"Token": {"address": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"}}"#,
    )
    .unwrap();

    let ledger = LedgerFile::new(&path).load().unwrap();

    assert_eq!(ledger.get("Token").unwrap().args, Vec::<ArgValue>::new());
}

#[test]
fn test_merge_and_save_preserves_unrelated_records() {
    // Given a ledger on disk with Token and Vault
    let dir = TempDir::new().unwrap();
    let file = LedgerFile::new(dir.path().join("deployments.json"));
    let mut existing = Ledger::new();
    existing.insert("Token", DeploymentRecord::new(addr('1'), vec![]));
    existing.insert(
        "Vault",
        DeploymentRecord::new(addr('2'), vec![ArgValue::address(&addr('1'))]),
    );
    file.save(&existing).unwrap();

    // When only Token is updated
    let mut updates = Ledger::new();
    updates.insert("Token", DeploymentRecord::new(addr('3'), vec![]));
    let merged = file.merge_and_save(&updates).unwrap();

    // Then Vault is untouched on disk
    let reloaded = file.load().unwrap();
    assert_eq!(merged, reloaded);
    assert_eq!(reloaded.address_of("Token"), Some(&addr('3')));
    assert_eq!(reloaded.get("Vault"), existing.get("Vault"));
}
