use crate::domain::entities::{BatchEntry, BatchOutcome, HeatDataset, HeatVersion};
use crate::domain::value_objects::JudgeId;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Outbound gateway to the scoring server.
///
/// Implementations map failures onto the error taxonomy: transport
/// failures become `AppError::Network` (the queueing trigger), HTTP 4xx
/// becomes `AppError::Validation`, and any other non-success status
/// becomes `AppError::Http`.
#[async_trait]
pub trait ScoringApi: Send + Sync {
    /// `POST /scores/{judge}/post`; Ok carries the server's JSON echo.
    async fn post_score(&self, judge: &JudgeId, body: &Value) -> Result<Value, AppError>;

    /// `POST /scores/{judge}/batch` with the full pending list in one
    /// request; Ok carries per-record outcomes.
    async fn post_batch(
        &self,
        judge: &JudgeId,
        scores: &[BatchEntry],
    ) -> Result<BatchOutcome, AppError>;

    /// `GET /scores/{judge}/heats.json`.
    async fn fetch_heats(&self, judge: &JudgeId) -> Result<HeatDataset, AppError>;

    /// `GET /scores/{judge}/version/{heat}`.
    async fn fetch_version(
        &self,
        judge: &JudgeId,
        heat_number: i64,
    ) -> Result<HeatVersion, AppError>;
}
