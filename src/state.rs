use crate::application::ports::{ScoreStore, ScoringApi, SyncNotifier};
use crate::application::services::{ConnectivityTracker, NavigationGuard, SyncService};
use crate::domain::value_objects::JudgeId;
use crate::infrastructure::api::HttpScoringApi;
use crate::infrastructure::database::{ConnectionPool, SqliteScoreStore};
use crate::infrastructure::event::BroadcastNotifier;
use crate::shared::config::AppConfig;
use crate::shared::error::{AppError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::info;

/// Fully wired engine: one durable store, one server client, one
/// connectivity oracle, one sync façade. Everything is constructor
/// injected; nothing global.
pub struct AppState {
    config: AppConfig,
    pool: ConnectionPool,
    notifier: Arc<BroadcastNotifier>,
    pub tracker: Arc<ConnectivityTracker>,
    pub sync: Arc<SyncService>,
    pub navigation_guard: Arc<NavigationGuard>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        config.validate().map_err(AppError::Configuration)?;

        let pool = ConnectionPool::from_config(&config.database).await?;
        pool.migrate().await?;

        let notifier = Arc::new(BroadcastNotifier::default());
        let notifier_port: Arc<dyn SyncNotifier> = notifier.clone();

        let store: Arc<dyn ScoreStore> = Arc::new(SqliteScoreStore::new(pool.get_pool().clone()));
        let api: Arc<dyn ScoringApi> = Arc::new(HttpScoringApi::from_config(&config.server)?);

        let tracker = Arc::new(ConnectivityTracker::new(notifier_port.clone()));
        let sync = Arc::new(SyncService::new(
            store.clone(),
            api,
            tracker.clone(),
            notifier_port,
        ));
        sync.register_reconnect_drain();

        let navigation_guard = Arc::new(NavigationGuard::new(store, tracker.clone()));

        info!(server = %config.server.base_url, "scoring sync engine ready");

        Ok(Self {
            config,
            pool,
            notifier,
            tracker,
            sync,
            navigation_guard,
        })
    }

    /// Subscribe to engine notifications (pending count, score updates,
    /// connectivity edges).
    pub fn subscribe(&self) -> broadcast::Receiver<crate::application::ports::SyncEvent> {
        self.notifier.subscribe()
    }

    /// Start the periodic background drain for a judge, if auto-sync is
    /// configured. The returned handle aborts the loop when dropped by
    /// the caller's choice.
    pub fn start_auto_drain(&self, judge: JudgeId) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.sync.auto_sync {
            return None;
        }
        Some(
            self.sync
                .schedule_drain(judge, Duration::from_secs(self.config.sync.sync_interval)),
        )
    }

    pub async fn shutdown(&self) {
        self.pool.close().await;
    }
}
