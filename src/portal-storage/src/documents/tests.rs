//! Tests for the document stores.

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

use crate::documents::{DocumentStore, FileDocumentStore, MemoryDocumentStore, SetOptions};
use crate::error::StorageError;
use crate::paths::PortalPaths;

async fn file_store(dir: &tempfile::TempDir) -> FileDocumentStore {
    let store = FileDocumentStore::with_paths(PortalPaths::from_root(dir.path().to_path_buf()));
    store.init().await.unwrap();
    store
}

#[tokio::test]
async fn test_file_store_roundtrip() {
    let dir = tempdir().unwrap();
    let store = file_store(&dir).await;

    assert!(store.get("settings/roleVisibility").await.unwrap().is_none());

    let doc = json!({"roleSettings": {"viewer": {"command-center": true}}});
    store
        .set("settings/roleVisibility", doc.clone(), SetOptions::replace())
        .await
        .unwrap();

    assert_eq!(store.get("settings/roleVisibility").await.unwrap(), Some(doc));
    assert!(
        dir.path()
            .join("documents/settings/roleVisibility.json")
            .exists()
    );
}

#[tokio::test]
async fn test_file_store_replace_drops_old_fields() {
    let dir = tempdir().unwrap();
    let store = file_store(&dir).await;

    store
        .set("doc", json!({"a": 1, "b": 2}), SetOptions::replace())
        .await
        .unwrap();
    store
        .set("doc", json!({"c": 3}), SetOptions::replace())
        .await
        .unwrap();

    assert_eq!(store.get("doc").await.unwrap(), Some(json!({"c": 3})));
}

#[tokio::test]
async fn test_file_store_merge_keeps_other_fields() {
    let dir = tempdir().unwrap();
    let store = file_store(&dir).await;

    store
        .set("doc", json!({"a": 1, "b": 2}), SetOptions::replace())
        .await
        .unwrap();
    store
        .set("doc", json!({"b": 20}), SetOptions::merge())
        .await
        .unwrap();

    assert_eq!(store.get("doc").await.unwrap(), Some(json!({"a": 1, "b": 20})));
}

#[tokio::test]
async fn test_file_store_requires_init() {
    let dir = tempdir().unwrap();
    let store = FileDocumentStore::with_paths(PortalPaths::from_root(dir.path().to_path_buf()));

    assert!(!store.is_initialized());
    assert!(matches!(
        store.get("doc").await,
        Err(StorageError::NotInitialized)
    ));
    let err = store
        .set("doc", json!({}), SetOptions::replace())
        .await
        .unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_file_store_corrupt_document() {
    let dir = tempdir().unwrap();
    let store = file_store(&dir).await;

    std::fs::write(dir.path().join("documents/broken.json"), "{not json").unwrap();

    assert!(matches!(
        store.get("broken").await,
        Err(StorageError::Json(_))
    ));
}

#[tokio::test]
async fn test_file_store_invalid_path() {
    let dir = tempdir().unwrap();
    let store = file_store(&dir).await;

    assert!(matches!(
        store.get("../outside").await,
        Err(StorageError::InvalidPath(_))
    ));
}

#[tokio::test]
async fn test_memory_store() {
    let store = MemoryDocumentStore::new();
    assert!(store.is_empty().await);

    store
        .set("settings/a", json!({"x": 1}), SetOptions::replace())
        .await
        .unwrap();
    store
        .set("settings/a", json!({"y": 2}), SetOptions::merge())
        .await
        .unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(
        store.get("settings/a").await.unwrap(),
        Some(json!({"x": 1, "y": 2}))
    );
    assert!(store.get("settings/b").await.unwrap().is_none());
}

#[tokio::test]
async fn test_memory_store_failed_merge_keeps_document() {
    let store = MemoryDocumentStore::new();
    store
        .set("doc", json!([1, 2]), SetOptions::replace())
        .await
        .unwrap();

    let err = store.set("doc", json!({"a": 1}), SetOptions::merge()).await;
    assert!(matches!(err, Err(StorageError::NotAnObject(_))));
    assert_eq!(store.get("doc").await.unwrap(), Some(json!([1, 2])));
}
