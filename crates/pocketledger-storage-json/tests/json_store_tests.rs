use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tempfile::tempdir;

use pocketledger_core::{KeyValueStore, Ledger};
use pocketledger_domain::CategoryTaxonomy;
use pocketledger_storage_json::JsonFileStore;

#[test]
fn json_store_saves_and_loads_values() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path()).expect("create store");

    assert!(store.load("entries").expect("load").is_none());

    store
        .save("entries", &json!([{"amount": 12.5}]))
        .expect("save");
    let loaded = store.load("entries").expect("load");
    assert_eq!(loaded, Some(json!([{"amount": 12.5}])));

    let path = store.key_path("entries").expect("path");
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());
}

#[test]
fn save_overwrites_without_leaving_temp_files() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path()).expect("create store");

    store.save("limits", &json!({"Groceries": 100.0})).expect("save");
    store.save("limits", &json!({"Groceries": 250.0})).expect("save");

    assert_eq!(
        store.load("limits").expect("load"),
        Some(json!({"Groceries": 250.0}))
    );
    let leftovers = std::fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn remove_is_a_no_op_for_missing_keys() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path()).expect("create store");

    store.remove("entries").expect("remove missing");
    store.save("entries", &json!([])).expect("save");
    store.remove("entries").expect("remove");
    assert!(store.load("entries").expect("load").is_none());
}

#[test]
fn ledger_state_round_trips_through_the_filesystem() {
    let dir = tempdir().expect("tempdir");
    let store = Arc::new(JsonFileStore::new(dir.path()).expect("create store"));

    let date = NaiveDate::from_ymd_opt(2024, 3, 5).expect("date");
    let snapshot = {
        let mut ledger =
            Ledger::open(store.clone(), CategoryTaxonomy::standard()).expect("open");
        ledger
            .add_expense(date, 120.50, "Groceries", Some("week shop".into()))
            .expect("add expense");
        ledger.set_limit("Groceries", Some(250.0)).expect("limit");
        ledger.snapshot()
    };

    let reloaded = Ledger::open(store, CategoryTaxonomy::standard()).expect("reopen");
    assert_eq!(reloaded.snapshot(), snapshot);
}
