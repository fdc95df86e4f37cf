use crate::application::ports::ScoreStore;
use crate::application::services::connectivity::ConnectivityTracker;
use crate::domain::value_objects::JudgeId;
use crate::shared::error::Result;
use std::sync::Arc;
use tracing::debug;

/// What the UI shell should do with a navigation attempt. `Confirm` maps
/// to a native confirmation dialog (for unload, setting `returnValue`);
/// refusing cancels the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Confirm { pending: u64 },
}

/// Blocks silent data loss: leaving the scoring routes while offline with
/// unsynced scores would strand the queue, so the user gets to confirm.
/// Online navigation is never blocked — a background drain is either in
/// flight or about to succeed.
pub struct NavigationGuard {
    store: Arc<dyn ScoreStore>,
    tracker: Arc<ConnectivityTracker>,
    /// Route prefixes inside which the queue stays reachable.
    scoring_routes: Vec<String>,
}

impl NavigationGuard {
    pub fn new(store: Arc<dyn ScoreStore>, tracker: Arc<ConnectivityTracker>) -> Self {
        Self {
            store,
            tracker,
            scoring_routes: vec!["/scores/".to_string()],
        }
    }

    pub fn with_scoring_routes(mut self, routes: Vec<String>) -> Self {
        self.scoring_routes = routes;
        self
    }

    /// In-app route change toward `destination`.
    pub async fn check_navigation(
        &self,
        judge: &JudgeId,
        destination: &str,
    ) -> Result<NavigationDecision> {
        if self.is_scoring_route(destination) {
            return Ok(NavigationDecision::Allow);
        }
        self.check_unload(judge).await
    }

    /// Full page unload / tab close.
    pub async fn check_unload(&self, judge: &JudgeId) -> Result<NavigationDecision> {
        if self.tracker.is_online() {
            return Ok(NavigationDecision::Allow);
        }
        let pending = self.store.dirty_score_count(judge).await?;
        if pending == 0 {
            return Ok(NavigationDecision::Allow);
        }
        debug!(pending, "blocking offline navigation with unsynced scores");
        Ok(NavigationDecision::Confirm { pending })
    }

    fn is_scoring_route(&self, destination: &str) -> bool {
        self.scoring_routes
            .iter()
            .any(|prefix| destination.starts_with(prefix))
    }
}
