#![allow(dead_code)]

use async_trait::async_trait;
use scoresync::application::ports::{NullNotifier, ScoreStore, ScoringApi, SyncNotifier};
use scoresync::application::services::{ConnectivityTracker, SyncService};
use scoresync::domain::entities::{BatchEntry, BatchOutcome, HeatDataset, HeatVersion, ScoreRef};
use scoresync::infrastructure::database::{ConnectionPool, SqliteScoreStore};
use scoresync::shared::error::AppError;
use scoresync::JudgeId;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const MAX_UPDATED_AT: &str = "2026-03-01T10:00:00Z";

pub fn judge() -> JudgeId {
    JudgeId::new(7).expect("judge id")
}

pub async fn sqlite_store() -> Arc<SqliteScoreStore> {
    let pool = ConnectionPool::from_memory().await.expect("in-memory sqlite");
    pool.migrate().await.expect("migrations");
    Arc::new(SqliteScoreStore::new(pool.get_pool().clone()))
}

/// Scripted scoring server: flip `online`, inspect call counts, and queue
/// a canned batch response for partial-failure scenarios.
pub struct FakeScoringApi {
    pub online: AtomicBool,
    pub batch_calls: AtomicUsize,
    pub heats_calls: AtomicUsize,
    pub batch_sizes: Mutex<Vec<usize>>,
    pub batch_response: Mutex<Option<BatchOutcome>>,
    pub batch_gate: Mutex<Option<Arc<Notify>>>,
    pub heat_count: AtomicUsize,
}

impl FakeScoringApi {
    pub fn new(online: bool) -> Arc<Self> {
        Arc::new(Self {
            online: AtomicBool::new(online),
            batch_calls: AtomicUsize::new(0),
            heats_calls: AtomicUsize::new(0),
            batch_sizes: Mutex::new(Vec::new()),
            batch_response: Mutex::new(None),
            batch_gate: Mutex::new(None),
            heat_count: AtomicUsize::new(2),
        })
    }

    /// Make every batch request block until the returned handle is
    /// notified, so tests can interleave work while an upload is in
    /// flight.
    pub fn hold_batches(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.batch_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn go_online(&self) {
        self.online.store(true, Ordering::SeqCst);
    }

    pub fn go_offline(&self) {
        self.online.store(false, Ordering::SeqCst);
    }

    fn unreachable() -> AppError {
        AppError::Network("connection refused".into())
    }
}

#[async_trait]
impl ScoringApi for FakeScoringApi {
    async fn post_score(&self, _judge: &JudgeId, body: &Value) -> Result<Value, AppError> {
        if !self.online.load(Ordering::SeqCst) {
            return Err(Self::unreachable());
        }
        Ok(body.clone())
    }

    async fn post_batch(
        &self,
        _judge: &JudgeId,
        scores: &[BatchEntry],
    ) -> Result<BatchOutcome, AppError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().unwrap().push(scores.len());
        let gate = self.batch_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if !self.online.load(Ordering::SeqCst) {
            return Err(Self::unreachable());
        }
        if let Some(response) = self.batch_response.lock().unwrap().clone() {
            return Ok(response);
        }
        Ok(BatchOutcome {
            succeeded: scores
                .iter()
                .map(|entry| ScoreRef {
                    heat: entry.heat,
                    slot: entry.slot,
                })
                .collect(),
            failed: vec![],
        })
    }

    async fn fetch_heats(&self, _judge: &JudgeId) -> Result<HeatDataset, AppError> {
        self.heats_calls.fetch_add(1, Ordering::SeqCst);
        if !self.online.load(Ordering::SeqCst) {
            return Err(Self::unreachable());
        }
        let dataset = json!({
            "max_updated_at": MAX_UPDATED_AT,
            "heat_count": self.heat_count.load(Ordering::SeqCst),
            "heats": [{"number": 100}, {"number": 101}],
        });
        Ok(serde_json::from_value(dataset).expect("dataset"))
    }

    async fn fetch_version(
        &self,
        _judge: &JudgeId,
        heat_number: i64,
    ) -> Result<HeatVersion, AppError> {
        if !self.online.load(Ordering::SeqCst) {
            return Err(Self::unreachable());
        }
        Ok(HeatVersion {
            heat_number,
            max_updated_at: MAX_UPDATED_AT.to_string(),
            heat_count: self.heat_count.load(Ordering::SeqCst) as i64,
        })
    }
}

pub struct TestEngine {
    pub service: Arc<SyncService>,
    pub tracker: Arc<ConnectivityTracker>,
    pub store: Arc<SqliteScoreStore>,
    pub api: Arc<FakeScoringApi>,
}

pub async fn engine_with(api: Arc<FakeScoringApi>, notifier: Arc<dyn SyncNotifier>) -> TestEngine {
    let store = sqlite_store().await;
    let tracker = Arc::new(ConnectivityTracker::new(notifier.clone()));
    let service = Arc::new(SyncService::new(
        store.clone() as Arc<dyn ScoreStore>,
        api.clone() as Arc<dyn ScoringApi>,
        tracker.clone(),
        notifier,
    ));
    service.register_reconnect_drain();
    TestEngine {
        service,
        tracker,
        store,
        api,
    }
}

pub async fn engine(online: bool) -> TestEngine {
    engine_with(FakeScoringApi::new(online), Arc::new(NullNotifier)).await
}
