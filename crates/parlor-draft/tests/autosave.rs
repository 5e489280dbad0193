//! Integration tests for loading and debounced autosave.

use std::sync::Arc;
use std::time::Duration;

use parlor_draft::{
    AutoSaver, DraftConfig, DraftError, DraftLoader, DraftStore, MemoryDraftStorage,
    select_auto_saved_message,
};

const DEBOUNCE: Duration = Duration::from_millis(500);

fn config() -> DraftConfig {
    DraftConfig {
        autosave_debounce: DEBOUNCE,
    }
}

fn auto_saved(store: &DraftStore) -> Option<String> {
    store.with(|s| select_auto_saved_message(s).map(str::to_owned))
}

async fn loaded(content: &str) -> (DraftStore, Arc<MemoryDraftStorage>) {
    let store = DraftStore::default();
    let storage = Arc::new(MemoryDraftStorage::new().with_autosave(content));
    let effects = DraftLoader::new(store.clone(), Arc::clone(&storage))
        .load_request()
        .await;
    assert!(effects.is_empty());
    (store, storage)
}

// =========================================================================
// Loading
// =========================================================================

#[tokio::test]
async fn test_draft_hidden_until_loaded() {
    let store = DraftStore::default();
    let storage = Arc::new(MemoryDraftStorage::new().with_autosave("hello"));
    assert_eq!(auto_saved(&store), None);

    DraftLoader::new(store.clone(), storage).load_request().await;

    assert_eq!(auto_saved(&store), Some("hello".into()));
}

// =========================================================================
// Debounce
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_burst_of_edits_saves_once() {
    let (store, storage) = loaded("").await;
    let saver = AutoSaver::spawn(store.clone(), Arc::clone(&storage), &config());

    for content in ["h", "he", "hel", "hell", "hello"] {
        saver.message_auto_save_request(content);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(storage.save_count().await, 0, "still typing");

    tokio::time::sleep(DEBOUNCE * 2).await;

    assert_eq!(storage.save_count().await, 1);
    assert_eq!(storage.saved().await, "hello");
    assert_eq!(auto_saved(&store), Some("hello".into()));
}

#[tokio::test(start_paused = true)]
async fn test_separate_pauses_save_separately() {
    let (store, storage) = loaded("").await;
    let saver = AutoSaver::spawn(store.clone(), Arc::clone(&storage), &config());

    saver.message_auto_save_request("first");
    tokio::time::sleep(DEBOUNCE * 2).await;
    saver.message_auto_save_request("second");
    tokio::time::sleep(DEBOUNCE * 2).await;

    assert_eq!(storage.save_count().await, 2);
    assert_eq!(auto_saved(&store), Some("second".into()));
}

#[tokio::test(start_paused = true)]
async fn test_idle_saver_never_saves() {
    let (_store, storage) = loaded("kept").await;
    let _saver = AutoSaver::spawn(DraftStore::default(), Arc::clone(&storage), &config());

    tokio::time::sleep(DEBOUNCE * 10).await;

    assert_eq!(storage.save_count().await, 0);
    assert_eq!(storage.saved().await, "kept");
}

// =========================================================================
// Flush and shutdown
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_flush_saves_immediately() {
    let (store, storage) = loaded("").await;
    let saver = AutoSaver::spawn(store.clone(), Arc::clone(&storage), &config());

    saver.message_auto_save_request("now");
    saver.flush().await.unwrap();

    assert_eq!(storage.saved().await, "now");
    assert_eq!(auto_saved(&store), Some("now".into()));

    // Nothing left for the debounce to save.
    tokio::time::sleep(DEBOUNCE * 2).await;
    assert_eq!(storage.save_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_flush_with_nothing_pending_is_ok() {
    let (store, storage) = loaded("").await;
    let saver = AutoSaver::spawn(store, Arc::clone(&storage), &config());

    saver.flush().await.unwrap();

    assert_eq!(storage.save_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_flush_reports_storage_failure() {
    let (store, storage) = loaded("old").await;
    let saver = AutoSaver::spawn(store.clone(), Arc::clone(&storage), &config());
    storage.set_failing(true).await;

    saver.message_auto_save_request("lost?");
    let result = saver.flush().await;

    assert!(matches!(result, Err(DraftError::Storage(_))));
    assert_eq!(auto_saved(&store), Some("old".into()));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_saves_pending_content() {
    let (store, storage) = loaded("").await;
    let saver = AutoSaver::spawn(store.clone(), Arc::clone(&storage), &config());

    saver.message_auto_save_request("unsaved");
    saver.shutdown().await;

    assert_eq!(storage.saved().await, "unsaved");
    assert_eq!(auto_saved(&store), Some("unsaved".into()));
}

// =========================================================================
// Failed saves
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_failed_debounced_save_is_flushed_after_recovery() {
    let (store, storage) = loaded("old").await;
    let saver = AutoSaver::spawn(store.clone(), Arc::clone(&storage), &config());
    storage.set_failing(true).await;

    saver.message_auto_save_request("typed reply");
    tokio::time::sleep(DEBOUNCE + Duration::from_millis(100)).await;
    assert_eq!(storage.saved().await, "old");

    storage.set_failing(false).await;
    saver.flush().await.unwrap();

    assert_eq!(storage.saved().await, "typed reply");
    assert_eq!(auto_saved(&store), Some("typed reply".into()));
}

#[tokio::test(start_paused = true)]
async fn test_failed_debounced_save_retries_after_debounce() {
    let (store, storage) = loaded("old").await;
    let saver = AutoSaver::spawn(store.clone(), Arc::clone(&storage), &config());
    storage.set_failing(true).await;

    saver.message_auto_save_request("typed reply");
    tokio::time::sleep(DEBOUNCE + Duration::from_millis(100)).await;
    storage.set_failing(false).await;
    tokio::time::sleep(DEBOUNCE * 2).await;

    assert_eq!(storage.saved().await, "typed reply");
    assert_eq!(storage.save_count().await, 1);
    drop(saver);
}

#[tokio::test(start_paused = true)]
async fn test_failed_flush_keeps_content_for_next_flush() {
    let (store, storage) = loaded("old").await;
    let saver = AutoSaver::spawn(store.clone(), Arc::clone(&storage), &config());
    storage.set_failing(true).await;

    saver.message_auto_save_request("typed reply");
    assert!(saver.flush().await.is_err());

    storage.set_failing(false).await;
    saver.flush().await.unwrap();

    assert_eq!(storage.saved().await, "typed reply");
}

#[tokio::test(start_paused = true)]
async fn test_newer_edit_replaces_content_of_failed_save() {
    let (store, storage) = loaded("old").await;
    let saver = AutoSaver::spawn(store.clone(), Arc::clone(&storage), &config());
    storage.set_failing(true).await;

    saver.message_auto_save_request("draft one");
    assert!(saver.flush().await.is_err());
    saver.message_auto_save_request("draft two");
    storage.set_failing(false).await;
    saver.flush().await.unwrap();

    assert_eq!(storage.saved().await, "draft two");
    assert_eq!(storage.save_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_saves_content_of_failed_save() {
    let (store, storage) = loaded("old").await;
    let saver = AutoSaver::spawn(store.clone(), Arc::clone(&storage), &config());
    storage.set_failing(true).await;

    saver.message_auto_save_request("typed reply");
    tokio::time::sleep(DEBOUNCE + Duration::from_millis(100)).await;
    storage.set_failing(false).await;
    saver.shutdown().await;

    assert_eq!(storage.saved().await, "typed reply");
}
