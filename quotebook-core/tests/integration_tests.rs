//! Integration tests for quotebook-core

use std::sync::Arc;

use quotebook_core::prelude::*;
use quotebook_core::store::EXPORT_FILE_NAME;

async fn open_in(dir: &std::path::Path) -> QuoteStore {
    let kv = FileKv::in_dir(dir).await.unwrap();
    QuoteStore::open(Arc::new(kv), Arc::new(MemoryKv::new()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_fresh_store_starts_from_seed() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_in(dir.path()).await;

    assert_eq!(store.len(), 3);
    assert_eq!(
        store.categories(),
        vec!["Education", "Philosophy", "Technology"]
    );
}

#[tokio::test]
async fn test_added_quote_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let added = {
        let mut store = open_in(dir.path()).await;
        store.add("Less is more.", "Design").await.unwrap()
    };

    let store = open_in(dir.path()).await;
    assert_eq!(store.len(), 4);
    assert_eq!(store.get(added.id), Some(&added));
    assert_eq!(store.categories().last().map(String::as_str), Some("Design"));
}

#[tokio::test]
async fn test_last_category_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = open_in(dir.path()).await;
        let filter = CategoryFilter::Named("Technology".to_string());
        let picked = store.select(&filter).await.unwrap().unwrap();
        assert_eq!(picked.category, "Technology");
    }

    let store = open_in(dir.path()).await;
    assert_eq!(
        store.last_category().await.unwrap(),
        CategoryFilter::Named("Technology".to_string())
    );
}

#[tokio::test]
async fn test_export_file_round_trip() {
    let source_dir = tempfile::tempdir().unwrap();
    let mut source = open_in(source_dir.path()).await;
    source.add("Make it work, then make it fast.", "Technology").await.unwrap();

    let export_dir = tempfile::tempdir().unwrap();
    let path = source.export_to(export_dir.path()).await.unwrap();
    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);

    let target_dir = tempfile::tempdir().unwrap();
    let kv = FileKv::in_dir(target_dir.path()).await.unwrap();
    kv.set(quotebook_core::kv::QUOTES_KEY, "[]".to_string())
        .await
        .unwrap();
    let mut target = QuoteStore::open(Arc::new(kv), Arc::new(MemoryKv::new()))
        .await
        .unwrap();
    target.import_file(&path).await.unwrap();

    assert_eq!(target.quotes(), source.quotes());
}

#[tokio::test]
async fn test_import_non_array_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_in(dir.path()).await;
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"text": "solo", "category": "c"}"#).unwrap();

    let err = store.import_file(&path).await.unwrap_err();
    assert!(matches!(err, Error::Format(_)));
    assert!(err.is_user_facing());
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_corrupt_quotes_slot_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let kv = FileKv::in_dir(dir.path()).await.unwrap();
    kv.set(quotebook_core::kv::QUOTES_KEY, "not json".to_string())
        .await
        .unwrap();

    let store = QuoteStore::open(Arc::new(kv), Arc::new(MemoryKv::new()))
        .await
        .unwrap();
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_sync_pass_keeps_writes_from_another_process() {
    let dir = tempfile::tempdir().unwrap();
    let mut watcher = open_in(dir.path()).await;

    let mut other = open_in(dir.path()).await;
    let added = other.add("Mine.", "Personal").await.unwrap();
    let filter = CategoryFilter::Named("Personal".to_string());
    other.select(&filter).await.unwrap();

    let outcome = watcher
        .apply_remote(vec![
            Quote::new(1, "From the server.", "General").with_last_modified(i64::MAX)
        ])
        .await
        .unwrap();
    assert_eq!(outcome.updated, 1);

    let reopened = open_in(dir.path()).await;
    assert_eq!(reopened.len(), 4);
    assert_eq!(reopened.get(added.id), Some(&added));
    assert_eq!(reopened.get(1).unwrap().text, "From the server.");
    assert_eq!(reopened.last_category().await.unwrap(), filter);
}

#[tokio::test]
async fn test_add_after_another_process_imported_keeps_both() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = open_in(dir.path()).await;
    let mut second = open_in(dir.path()).await;

    let imported = second
        .import_json(r#"[{"id": 77, "text": "Imported.", "category": "Batch"}]"#)
        .await
        .unwrap();
    let added = first.add("Typed.", "Manual").await.unwrap();

    let reopened = open_in(dir.path()).await;
    assert_eq!(reopened.len(), 5);
    assert_eq!(reopened.get(imported[0].id), Some(&imported[0]));
    assert_eq!(reopened.get(added.id), Some(&added));
}

#[test]
fn test_merge_properties() {
    let local = vec![Quote::new(1, "local", "A").with_last_modified(10)];

    let newer = merge(local.clone(), vec![Quote::new(1, "r", "A").with_last_modified(20)]);
    assert_eq!(newer.updated, 1);
    assert_eq!(newer.quotes[0].last_modified, 20);

    let older = merge(local.clone(), vec![Quote::new(1, "r", "A").with_last_modified(5)]);
    assert_eq!(older.updated, 0);
    assert_eq!(older.quotes, local);

    let disjoint = merge(local, vec![Quote::new(2, "r", "B").with_last_modified(5)]);
    assert_eq!(
        disjoint.quotes.iter().map(|q| q.id).collect::<Vec<_>>(),
        vec![1, 2]
    );
}
