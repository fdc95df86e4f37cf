//! The queue must survive restarts, and the engine must announce state
//! changes to subscribers.

mod common;

use common::{engine_with, judge, FakeScoringApi};
use scoresync::application::ports::{ScoreStore, SyncEvent, SyncNotifier};
use scoresync::domain::entities::{DirtyScoreRecord, ScoreUpdate};
use scoresync::infrastructure::database::{ConnectionPool, SqliteScoreStore};
use scoresync::infrastructure::event::BroadcastNotifier;
use scoresync::ScoreKey;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn dirty_scores_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite:{}?mode=rwc",
        dir.path().join("scoresync.db").display()
    );

    let key = ScoreKey::new(judge(), 100, Some(1));
    let record = DirtyScoreRecord {
        score: "G".into(),
        comments: "queued mid-event".into(),
        good: String::new(),
        bad: String::new(),
        student_id: None,
        person_id: None,
    };

    {
        let pool = ConnectionPool::new(&url, 1).await.unwrap();
        pool.migrate().await.unwrap();
        let store = SqliteScoreStore::new(pool.get_pool().clone());
        store.add_dirty_score(&key, &record).await.unwrap();
        pool.close().await;
    }

    // Fresh process: same database file, queue intact.
    let pool = ConnectionPool::new(&url, 1).await.unwrap();
    pool.migrate().await.unwrap();
    let store = SqliteScoreStore::new(pool.get_pool().clone());

    assert_eq!(store.dirty_score_count(&judge()).await.unwrap(), 1);
    let stored = store.get_dirty_score(&key).await.unwrap().unwrap();
    assert_eq!(stored, record);
}

#[tokio::test]
async fn queueing_a_score_notifies_subscribers() {
    let notifier = Arc::new(BroadcastNotifier::default());
    let mut events = notifier.subscribe();
    let ctx = engine_with(
        FakeScoringApi::new(false),
        notifier.clone() as Arc<dyn SyncNotifier>,
    )
    .await;

    let update = ScoreUpdate::new(100, None, json!({"score": "G"}).as_object().cloned().unwrap());
    ctx.service
        .save_score(&judge(), &update, None)
        .await
        .unwrap();

    let mut seen = Vec::new();
    for _ in 0..3 {
        seen.push(events.recv().await.unwrap());
    }
    assert!(seen.contains(&SyncEvent::ConnectivityChanged));
    assert!(seen.contains(&SyncEvent::PendingCountChanged));
    assert!(seen.contains(&SyncEvent::ScoreUpdated));
}
