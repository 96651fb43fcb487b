use std::{fs, path::Path};

use liq_ana_core::{
    account::Account,
    analysis::{filter_by_collateral_token, filter_force_close},
    file_manager::{load_accounts, save_accounts},
    AnalysisError, JsonFileManager, SaveOptions, SortOrder,
};
use tempdir::TempDir;

const LIQUIDATED_LIST: &str = "../../test-data/liquidated_list.json";

fn account_ids(accounts: &[Account]) -> Vec<&str> {
    accounts.iter().map(|a| a.fields()["accountId"].as_str().unwrap()).collect()
}

#[test]
fn test_force_close_from_file() {
    let accounts = load_accounts(&JsonFileManager {}, Path::new(LIQUIDATED_LIST)).unwrap();
    assert_eq!(accounts.len(), 6);

    let result = filter_force_close(&accounts, SortOrder::Descending, 0).unwrap();
    assert_eq!(
        account_ids(&result),
        vec![
            "0x0f9e8d7c6b5a49382716f5e4d3c2b1a098765432",
            "0x3d6f5b1a2e7c9d84f0b1c2d3e4f5a6b7c8d9e0f1",
            "0x5566778899aabbccddeeff001122334455667788",
            "0x1234abcd5678ef901234abcd5678ef901234abcd",
        ]
    );

    let top = filter_force_close(&accounts, SortOrder::Descending, 2).unwrap();
    assert_eq!(top, result[..2].to_vec());
}

#[test]
fn test_collateral_token_from_file() {
    let accounts = load_accounts(&JsonFileManager {}, Path::new(LIQUIDATED_LIST)).unwrap();

    let result = filter_by_collateral_token(&accounts, "wrap.near").unwrap();
    assert_eq!(
        account_ids(&result),
        vec![
            "0x3d6f5b1a2e7c9d84f0b1c2d3e4f5a6b7c8d9e0f1",
            "0x5566778899aabbccddeeff001122334455667788",
            "0xaabbccddeeff00112233445566778899aabbccdd",
        ]
    );
    assert!(filter_by_collateral_token(&accounts, "unknown.token").unwrap().is_empty());
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = TempDir::new("liq-ana-core").unwrap();
    let file_manager = JsonFileManager {};
    let accounts = load_accounts(&file_manager, Path::new(LIQUIDATED_LIST)).unwrap();
    let result = filter_force_close(&accounts, SortOrder::Descending, 0).unwrap();

    for opts in [
        SaveOptions::default(),
        SaveOptions { sort_keys: true, ensure_ascii: false },
    ] {
        let path = dir.path().join("ana_force_close.json");
        save_accounts(&file_manager, &path, &result, opts).unwrap();
        let reloaded = load_accounts(&file_manager, &path).unwrap();
        assert_eq!(reloaded, result);
    }
}

#[test]
fn test_saved_file_is_ascii_by_default() {
    let dir = TempDir::new("liq-ana-core").unwrap();
    let file_manager = JsonFileManager {};
    let accounts = load_accounts(&file_manager, Path::new(LIQUIDATED_LIST)).unwrap();

    let path = dir.path().join("all.json");
    save_accounts(&file_manager, &path, &accounts, SaveOptions::default()).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.is_ascii());
    assert!(written.contains("caf\\u00e9"));
    assert!(written.starts_with("[\n  {\n    \"accountId\""));
}

#[test]
fn test_missing_source_file() {
    let dir = TempDir::new("liq-ana-core").unwrap();
    let result = load_accounts(&JsonFileManager {}, &dir.path().join("liquidated_list.json"));
    assert!(matches!(result, Err(AnalysisError::Io(_))));
}
