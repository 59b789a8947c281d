use quiz_core::model::{Outcome, ProgressSnapshot};
use storage::repository::{PROGRESS_KEY, ProgressStore};
use storage::sqlite::SqliteProgressStore;

fn snapshot(answered: usize, score: u32) -> ProgressSnapshot {
    let results = (0..answered)
        .map(|i| {
            let correct = (i as u32) < score;
            Outcome::new(format!("Q{}", i + 1), "am", "am", correct, false)
        })
        .collect();
    ProgressSnapshot::new("iamyouare", answered, score, results)
}

#[tokio::test]
async fn sqlite_round_trips_and_overwrites_the_snapshot() {
    let store = SqliteProgressStore::open("sqlite:file:memdb_progress_roundtrip?mode=memory&cache=shared")
        .await
        .expect("open");

    assert!(store.load_snapshot().await.unwrap().is_none());

    store.save_snapshot(&snapshot(1, 1)).await.unwrap();
    let loaded = store.load_snapshot().await.unwrap().expect("snapshot");
    assert_eq!(loaded, snapshot(1, 1));

    // One key, so a later save replaces the earlier state.
    store.save_snapshot(&snapshot(3, 2)).await.unwrap();
    let loaded = store.load_snapshot().await.unwrap().expect("snapshot");
    assert_eq!(loaded.current_question_index, 3);
    assert_eq!(loaded.score, 2);
    assert_eq!(loaded.session_results.len(), 3);
}

#[tokio::test]
async fn sqlite_clear_removes_the_snapshot_and_is_idempotent() {
    let store = SqliteProgressStore::open("sqlite:file:memdb_progress_clear?mode=memory&cache=shared")
        .await
        .expect("open");

    store.save_snapshot(&snapshot(2, 1)).await.unwrap();
    store.clear_snapshot().await.unwrap();
    assert!(store.load_snapshot().await.unwrap().is_none());

    // Clearing an absent snapshot is not an error.
    store.clear_snapshot().await.unwrap();
}

#[tokio::test]
async fn sqlite_treats_corrupt_payload_as_no_snapshot() {
    let store = SqliteProgressStore::open("sqlite:file:memdb_progress_corrupt?mode=memory&cache=shared")
        .await
        .expect("open");

    sqlx::query("INSERT INTO saved_progress (key, payload, saved_at) VALUES (?1, ?2, ?3)")
        .bind(PROGRESS_KEY)
        .bind("{definitely not json")
        .bind(chrono::Utc::now())
        .execute(store.pool())
        .await
        .unwrap();

    assert!(store.load_snapshot().await.unwrap().is_none());
}

#[tokio::test]
async fn migration_is_safe_to_run_twice() {
    let store = SqliteProgressStore::open("sqlite:file:memdb_progress_migrate?mode=memory&cache=shared")
        .await
        .expect("open");
    store.migrate().await.expect("second migrate");

    store.save_snapshot(&snapshot(1, 0)).await.unwrap();
    assert!(store.load_snapshot().await.unwrap().is_some());
}
