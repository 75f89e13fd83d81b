//! Unit tests for the HistoryStore public API.
//!
//! Exercises append, load, delete, clear-all, the transient payload slots,
//! and the fail-open behavior under injected storage failures.

use std::sync::Arc;

use snipstash::managers::history_store::HistoryStore;
use snipstash::storage::{MemoryStorage, SqliteStorage};
use snipstash::types::history::{HistoryItem, PayloadFormat, PendingLink};

fn setup() -> HistoryStore {
    let storage = SqliteStorage::open_in_memory().expect("Failed to open in-memory storage");
    HistoryStore::new(Arc::new(storage))
}

#[tokio::test]
async fn test_append_snippet_prepends_and_persists() {
    let store = setup();

    store
        .append_snippet("<a>1</a>", PayloadFormat::Xml)
        .await
        .unwrap();
    let before = store.load().await;
    assert_eq!(before.len(), 1);

    let id = store
        .append_snippet(r#"{"b": 2}"#, PayloadFormat::Json)
        .await
        .expect("append should return the new id");

    let after = store.load().await;
    assert_eq!(after.len(), before.len() + 1);

    // Newest first, with matching content and format.
    match &after[0] {
        HistoryItem::Snippet(s) => {
            assert_eq!(s.id, id);
            assert_eq!(s.content, r#"{"b": 2}"#);
            assert_eq!(s.format, PayloadFormat::Json);
        }
        other => panic!("expected snippet at position 0, got {:?}", other),
    }
}

#[tokio::test]
async fn test_append_link_defaults_empty_title_to_url() {
    let store = setup();

    store
        .append_link("https://example.com/page", "", None)
        .await
        .unwrap();

    let items = store.load().await;
    match &items[0] {
        HistoryItem::Link(link) => {
            assert_eq!(link.title, "https://example.com/page");
            assert_eq!(link.fav_icon_url, None);
        }
        other => panic!("expected link at position 0, got {:?}", other),
    }
}

#[tokio::test]
async fn test_ids_are_unique_for_rapid_appends() {
    let store = setup();

    let mut ids = Vec::new();
    for _ in 0..20 {
        ids.push(store.append_snippet("1", PayloadFormat::Json).await.unwrap());
    }
    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len(), "ids must not collide");
}

#[tokio::test]
async fn test_delete_by_id_removes_matching_item() {
    let store = setup();

    let id1 = store.append_snippet("1", PayloadFormat::Json).await.unwrap();
    let id2 = store.append_snippet("2", PayloadFormat::Json).await.unwrap();

    assert!(store.delete_by_id(&id1).await);

    let items = store.load().await;
    assert_eq!(items.len(), 1);
    assert!(items.iter().all(|item| item.id() != id1));
    assert_eq!(items[0].id(), id2);
}

#[tokio::test]
async fn test_delete_of_absent_id_still_reports_success() {
    let store = setup();
    store.append_snippet("1", PayloadFormat::Json).await.unwrap();

    assert!(store.delete_by_id("no-such-id").await);
    assert_eq!(store.load().await.len(), 1);
}

#[tokio::test]
async fn test_clear_all_empties_history() {
    let store = setup();

    store.append_snippet("1", PayloadFormat::Json).await.unwrap();
    store
        .append_link("https://example.com", "Example", None)
        .await
        .unwrap();
    assert_eq!(store.load().await.len(), 2);

    assert!(store.clear_all().await);
    assert!(store.load().await.is_empty());
}

#[tokio::test]
async fn test_pending_snippet_slot_is_consumed_once() {
    let store = setup();

    store.stash_pending_snippet("{\"a\": 1}").await.unwrap();

    assert_eq!(
        store.take_pending_snippet().await.as_deref(),
        Some("{\"a\": 1}")
    );
    // Read once, then deleted.
    assert_eq!(store.take_pending_snippet().await, None);
}

#[tokio::test]
async fn test_pending_link_slot_is_consumed_once() {
    let store = setup();

    let link = PendingLink {
        url: "https://example.com".to_string(),
        title: "Example".to_string(),
        fav_icon_url: Some("https://example.com/favicon.ico".to_string()),
    };
    store.stash_pending_link(&link).await.unwrap();

    let taken = store.take_pending_link().await.unwrap();
    assert_eq!(taken.url, link.url);
    assert_eq!(taken.title, link.title);
    assert_eq!(taken.fav_icon_url, link.fav_icon_url);

    assert!(store.take_pending_link().await.is_none());
}

// ─── Fail-open behavior ───

#[tokio::test]
async fn test_load_fails_open_to_empty_list() {
    let storage = Arc::new(MemoryStorage::new());
    let store = HistoryStore::new(storage.clone());

    store.append_snippet("1", PayloadFormat::Json).await.unwrap();

    storage.fail_reads(true);
    assert!(store.load().await.is_empty());
}

#[tokio::test]
async fn test_append_returns_none_when_persist_fails() {
    let storage = Arc::new(MemoryStorage::new());
    let store = HistoryStore::new(storage.clone());

    storage.fail_writes(true);
    assert_eq!(store.append_snippet("1", PayloadFormat::Json).await, None);
    assert_eq!(
        store.append_link("https://example.com", "t", None).await,
        None
    );
}

#[tokio::test]
async fn test_delete_and_clear_report_false_when_persist_fails() {
    let storage = Arc::new(MemoryStorage::new());
    let store = HistoryStore::new(storage.clone());

    let id = store.append_snippet("1", PayloadFormat::Json).await.unwrap();

    storage.fail_writes(true);
    assert!(!store.delete_by_id(&id).await);
    assert!(!store.clear_all().await);

    storage.fail_writes(false);
    assert_eq!(store.load().await.len(), 1, "failed mutations must not lose data");
}
