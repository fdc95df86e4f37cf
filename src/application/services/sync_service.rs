use crate::application::ports::{ScoreStore, ScoringApi, SyncEvent, SyncNotifier};
use crate::application::services::connectivity::{ConnectivityHooks, ConnectivityTracker};
use crate::domain::entities::{BatchEntry, BatchOutcome, HeatDataset, ScoreRef, ScoreUpdate};
use crate::domain::score_merge;
use crate::domain::value_objects::{JudgeId, ScoreKey};
use crate::shared::error::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// How a score write was settled.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The server accepted the write; carries its JSON echo.
    Confirmed(Value),
    /// The server was unreachable; the write is queued durably and the
    /// carried value is the optimistic response for immediate UI update.
    Queued(Value),
}

/// Outcome of a heat-navigation version check. Never an error: this runs
/// on every client-side navigation and must not block viewing cached
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    /// Cached fingerprint matches the server's; cache is current.
    Current,
    /// Fingerprint mismatch forced a full refetch.
    Refetched,
    /// The version endpoint was unreachable; continuing on cached data.
    Offline,
}

/// Façade over the offline scoring pipeline: records dirty scores when
/// the server is unreachable, drains the queue in one batch on
/// reconnection, and keeps per-judge heat data fresh via a version-gated
/// refetch.
pub struct SyncService {
    store: Arc<dyn ScoreStore>,
    api: Arc<dyn ScoringApi>,
    tracker: Arc<ConnectivityTracker>,
    notifier: Arc<dyn SyncNotifier>,
    datasets: RwLock<HashMap<JudgeId, Arc<HeatDataset>>>,
    draining: AtomicBool,
}

impl SyncService {
    pub fn new(
        store: Arc<dyn ScoreStore>,
        api: Arc<dyn ScoringApi>,
        tracker: Arc<ConnectivityTracker>,
        notifier: Arc<dyn SyncNotifier>,
    ) -> Self {
        Self {
            store,
            api,
            tracker,
            notifier,
            datasets: RwLock::new(HashMap::new()),
            draining: AtomicBool::new(false),
        }
    }

    /// Wire the connectivity tracker so an offline→online edge spawns a
    /// queue drain for the active judge.
    pub fn register_reconnect_drain(self: &Arc<Self>) {
        self.tracker.set_hooks(Arc::new(DrainOnReconnect {
            service: Arc::downgrade(self),
        }));
    }

    /// Attempt a network write; on transport failure fall back to the
    /// durable queue and answer optimistically so the UI never waits on
    /// the network.
    ///
    /// `current` is the caller's last known full score state; when absent
    /// the queued record for the same identity (if any) serves as the
    /// baseline, so repeated offline edits accumulate instead of clearing
    /// each other.
    pub async fn save_score(
        &self,
        judge: &JudgeId,
        update: &ScoreUpdate,
        current: Option<&Map<String, Value>>,
    ) -> Result<SaveOutcome> {
        let body = update.to_request_body();
        match self.api.post_score(judge, &body).await {
            Ok(response) => {
                // A successful write is an authoritative online signal and
                // may itself trigger a drain of records queued while the
                // client believed it was offline.
                self.tracker.report(true, Some(*judge));
                self.notifier.notify(SyncEvent::ScoreUpdated);
                Ok(SaveOutcome::Confirmed(response))
            }
            Err(err) if err.is_connectivity_failure() => {
                let key = ScoreKey::new(*judge, update.heat, update.slot);
                debug!(%key, "score write failed to reach server, queueing");

                let stored_baseline = match current {
                    Some(_) => None,
                    None => self
                        .store
                        .get_dirty_score(&key)
                        .await?
                        .map(|record| record.to_state_map()),
                };
                let baseline = current.or(stored_baseline.as_ref());

                let record = score_merge::merge_for_offline(&update.fields, baseline);
                self.store.add_dirty_score(&key, &record).await?;

                self.tracker.report(false, Some(*judge));
                self.notifier.notify(SyncEvent::PendingCountChanged);
                self.notifier.notify(SyncEvent::ScoreUpdated);

                Ok(SaveOutcome::Queued(score_merge::generate_optimistic_response(
                    &update.fields,
                )))
            }
            // A reachable server that rejects the write is a validation
            // problem, not a connectivity one; retrying would silently
            // resubmit a bad score.
            Err(err) => Err(err),
        }
    }

    /// Upload every queued record for the judge in a single request and
    /// remove exactly the ones the server confirms. An empty queue makes
    /// no network call, and a drain already in flight turns this call
    /// into a no-op, so calling it repeatedly is cheap.
    pub async fn drain_dirty_scores(&self, judge: &JudgeId) -> Result<BatchOutcome> {
        if self
            .draining
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("drain already in flight, skipping");
            return Ok(BatchOutcome::default());
        }
        let _guard = DrainGuard(&self.draining);

        // Records added after this read stay queued for the next drain.
        let pending = self.store.get_dirty_scores(judge).await?;
        if pending.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let entries: Vec<BatchEntry> = pending.iter().map(BatchEntry::from).collect();
        match self.api.post_batch(judge, &entries).await {
            Ok(outcome) => {
                // Removal is gated on the revision seen at read time, so
                // an edit that lands while the batch is in flight keeps
                // its record queued for the next drain.
                for score_ref in &outcome.succeeded {
                    let Some(snapshot) = pending
                        .iter()
                        .find(|p| p.key.heat == score_ref.heat && p.key.slot == score_ref.slot)
                    else {
                        continue;
                    };
                    self.store
                        .remove_dirty_score(&snapshot.key, snapshot.revision)
                        .await?;
                }
                if !outcome.succeeded.is_empty() {
                    self.notifier.notify(SyncEvent::PendingCountChanged);
                }
                if !outcome.failed.is_empty() {
                    warn!(
                        failed = outcome.failed.len(),
                        "server rejected part of the batch; records stay queued"
                    );
                }
                self.tracker.report(true, Some(*judge));
                info!(
                    uploaded = outcome.succeeded.len(),
                    remaining = outcome.failed.len(),
                    "drained dirty scores"
                );
                Ok(outcome)
            }
            Err(err) => {
                // Total request failure: nothing is removed, everything
                // reports failed, and retry stays possible indefinitely.
                if err.is_connectivity_failure() {
                    self.tracker.report(false, Some(*judge));
                }
                warn!("batch upload failed, keeping {} records queued: {}", pending.len(), err);
                let refs = pending
                    .iter()
                    .map(|p| ScoreRef {
                        heat: p.key.heat,
                        slot: p.key.slot,
                    })
                    .collect();
                Ok(BatchOutcome::all_failed(refs))
            }
        }
    }

    /// Fetch the judge's full heat dataset, replacing the cached version
    /// fingerprint on success. Without `force` a previously fetched
    /// dataset is served from memory. Failures stay typed (`Http` vs
    /// `Network`) so callers can pick cached-data fallback over hard
    /// failure.
    pub async fn fetch_heat_data(&self, judge: &JudgeId, force: bool) -> Result<Arc<HeatDataset>> {
        if !force {
            if let Some(dataset) = self.datasets.read().await.get(judge) {
                return Ok(Arc::clone(dataset));
            }
        }

        let dataset = match self.api.fetch_heats(judge).await {
            Ok(dataset) => Arc::new(dataset),
            Err(err) => {
                if err.is_connectivity_failure() {
                    self.tracker.report(false, Some(*judge));
                }
                return Err(err);
            }
        };

        self.store
            .set_cached_version(judge, &dataset.fingerprint())
            .await?;
        self.datasets
            .write()
            .await
            .insert(*judge, Arc::clone(&dataset));
        self.tracker.report(true, Some(*judge));
        Ok(dataset)
    }

    /// Version-gated refetch used when navigating between heats: compare
    /// the server's lightweight fingerprint for this heat against the
    /// cached one and force a full refetch on any mismatch. Never returns
    /// an error — an unreachable version endpoint just means "keep
    /// showing cached data".
    pub async fn check_version_and_refetch(
        &self,
        judge: &JudgeId,
        heat_number: i64,
    ) -> VersionCheck {
        let version = match self.api.fetch_version(judge, heat_number).await {
            Ok(version) => version,
            Err(err) => {
                warn!(heat = heat_number, "version check unavailable: {}", err);
                return VersionCheck::Offline;
            }
        };

        let cached = match self.store.cached_version(judge).await {
            Ok(cached) => cached,
            Err(err) => {
                // Treat an unreadable fingerprint as stale rather than
                // blocking navigation.
                warn!("cached fingerprint unreadable: {}", err);
                None
            }
        };

        if cached.as_ref() == Some(&version.fingerprint()) {
            return VersionCheck::Current;
        }

        debug!(heat = heat_number, "fingerprint mismatch, refetching heat data");
        match self.fetch_heat_data(judge, true).await {
            Ok(_) => VersionCheck::Refetched,
            Err(err) => {
                warn!("refetch after version mismatch failed: {}", err);
                VersionCheck::Offline
            }
        }
    }

    /// Background retry loop: attempt a drain every `interval`. The drain
    /// itself is the connectivity probe, so no separate reachability
    /// check is needed.
    pub fn schedule_drain(
        self: &Arc<Self>,
        judge: JudgeId,
        interval: std::time::Duration,
    ) -> tokio::task::JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Err(err) = service.drain_dirty_scores(&judge).await {
                    warn!("scheduled drain failed: {}", err);
                }
            }
        })
    }
}

/// Resets the drain-in-flight flag on every exit path.
struct DrainGuard<'a>(&'a AtomicBool);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Reconnect hook: spawn a drain for the judge whose queue went stale.
/// Holds a weak reference so the tracker never keeps the service alive.
struct DrainOnReconnect {
    service: Weak<SyncService>,
}

impl ConnectivityHooks for DrainOnReconnect {
    fn on_reconnect(&self, judge: JudgeId) {
        if let Some(service) = self.service.upgrade() {
            tokio::spawn(async move {
                if let Err(err) = service.drain_dirty_scores(&judge).await {
                    warn!("reconnect drain failed: {}", err);
                }
            });
        }
    }

    fn on_disconnect(&self) {
        // UI indicators react via the ConnectivityChanged event; nothing
        // network-facing may happen here.
    }
}
