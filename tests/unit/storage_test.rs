//! Unit tests for the key-value storage backends.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};
use snipstash::storage::{MemoryStorage, SqliteStorage, Storage};

fn entries(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[tokio::test]
async fn test_set_then_get_roundtrip() {
    let storage = SqliteStorage::open_in_memory().unwrap();

    storage
        .set(entries(&[
            ("alpha", json!({"a": 1})),
            ("beta", json!(["x", "y"])),
        ]))
        .await
        .unwrap();

    let result = storage.get(&["alpha", "beta", "missing"]).await.unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result["alpha"], json!({"a": 1}));
    assert_eq!(result["beta"], json!(["x", "y"]));
    assert!(!result.contains_key("missing"));
}

#[tokio::test]
async fn test_set_replaces_existing_value() {
    let storage = SqliteStorage::open_in_memory().unwrap();

    storage.set(entries(&[("k", json!(1))])).await.unwrap();
    storage.set(entries(&[("k", json!(2))])).await.unwrap();

    let result = storage.get(&["k"]).await.unwrap();
    assert_eq!(result["k"], json!(2));
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let storage = SqliteStorage::open_in_memory().unwrap();

    storage.set(entries(&[("k", json!("v"))])).await.unwrap();
    storage.remove(&["k"]).await.unwrap();
    storage.remove(&["k"]).await.unwrap();

    let result = storage.get(&["k"]).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_values_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.db");

    {
        let storage = SqliteStorage::open(&path).unwrap();
        storage
            .set(entries(&[("persisted", json!({"n": 42}))]))
            .await
            .unwrap();
    }

    let storage = SqliteStorage::open(&path).unwrap();
    let result = storage.get(&["persisted"]).await.unwrap();
    assert_eq!(result["persisted"], json!({"n": 42}));
}

#[tokio::test]
async fn test_get_surfaces_backend_failure_instead_of_empty_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.db");

    let storage = SqliteStorage::open(&path).unwrap();
    storage.set(entries(&[("k", json!(1))])).await.unwrap();

    // Break the schema out from under the open connection; the read must
    // report a backend error, not an absent key.
    let raw = rusqlite::Connection::open(&path).unwrap();
    raw.execute("DROP TABLE kv_store", []).unwrap();

    let err = storage.get(&["k"]).await.unwrap_err();
    assert!(err.to_string().starts_with("Storage backend error: "));
}

#[tokio::test]
async fn test_memory_storage_failure_injection() {
    let storage = Arc::new(MemoryStorage::new());

    storage.set(entries(&[("k", json!(1))])).await.unwrap();

    storage.fail_reads(true);
    assert!(storage.get(&["k"]).await.is_err());
    storage.fail_reads(false);
    assert_eq!(storage.get(&["k"]).await.unwrap()["k"], json!(1));

    storage.fail_writes(true);
    assert!(storage.set(entries(&[("k", json!(2))])).await.is_err());
    assert!(storage.remove(&["k"]).await.is_err());
    storage.fail_writes(false);

    // Value untouched by the failed write.
    assert_eq!(storage.get(&["k"]).await.unwrap()["k"], json!(1));
}
