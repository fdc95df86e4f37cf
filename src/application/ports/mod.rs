pub mod notifier;
pub mod score_store;
pub mod scoring_api;

pub use notifier::{NullNotifier, SyncEvent, SyncNotifier};
pub use score_store::ScoreStore;
pub use scoring_api::ScoringApi;
