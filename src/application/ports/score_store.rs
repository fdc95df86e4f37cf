use crate::domain::entities::{DirtyScoreRecord, PendingScore, VersionFingerprint};
use crate::domain::value_objects::{JudgeId, ScoreKey};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable, judge-scoped storage for unsynced scores and the cached
/// version fingerprint. Survives restarts.
///
/// Every operation is a self-contained transaction; no locks are held
/// across await points. When the backing store is unavailable the
/// operation fails with `AppError::Storage` — data is never dropped
/// silently.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Upsert by `(judge, heat, slot)`. A second write for the same
    /// identity replaces the first wholesale (last-write-wins); no
    /// history is kept.
    async fn add_dirty_score(
        &self,
        key: &ScoreKey,
        record: &DirtyScoreRecord,
    ) -> Result<(), AppError>;

    async fn get_dirty_score(&self, key: &ScoreKey) -> Result<Option<DirtyScoreRecord>, AppError>;

    /// All pending records for a judge, unordered.
    async fn get_dirty_scores(&self, judge: &JudgeId) -> Result<Vec<PendingScore>, AppError>;

    /// Delete one record, but only while its revision is still at most
    /// `revision` (as seen by the read that justified the removal). A row
    /// rewritten since that read stays queued; absent keys are a no-op.
    async fn remove_dirty_score(&self, key: &ScoreKey, revision: i64) -> Result<(), AppError>;

    async fn clear_dirty_scores(&self, judge: &JudgeId) -> Result<(), AppError>;

    /// Pending-record count without materializing record bodies.
    async fn dirty_score_count(&self, judge: &JudgeId) -> Result<u64, AppError>;

    async fn cached_version(
        &self,
        judge: &JudgeId,
    ) -> Result<Option<VersionFingerprint>, AppError>;

    /// Replace the judge's fingerprint wholesale; never partially updated.
    async fn set_cached_version(
        &self,
        judge: &JudgeId,
        fingerprint: &VersionFingerprint,
    ) -> Result<(), AppError>;
}
