//! Offline-capable scoring synchronization engine.
//!
//! Judges score heats on tablets that drop off the network mid-event.
//! This crate keeps those scores safe and the UI responsive: a durable
//! per-judge dirty-score queue, edge-deduplicated connectivity tracking,
//! optimistic merge rules, single-request batch reconciliation, and a
//! version-gated refetch of heat data during navigation.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod state;

pub use application::ports::{ScoreStore, ScoringApi, SyncEvent, SyncNotifier};
pub use application::services::{
    ConnectivityTracker, NavigationDecision, NavigationGuard, SaveOutcome, SyncService,
    VersionCheck,
};
pub use domain::entities::{
    BatchOutcome, DirtyScoreRecord, HeatDataset, PendingScore, ScoreUpdate, VersionFingerprint,
};
pub use domain::value_objects::{JudgeId, ScoreKey};
pub use shared::config::AppConfig;
pub use shared::error::{AppError, Result};
pub use state::AppState;

/// Install the default tracing subscriber. Call once at startup;
/// `RUST_LOG` overrides the filter.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoresync=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
