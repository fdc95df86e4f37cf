use crate::application::ports::ScoreStore;
use crate::domain::entities::{DirtyScoreRecord, PendingScore, VersionFingerprint};
use crate::domain::value_objects::{JudgeId, ScoreKey};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, Pool, Row, Sqlite};

/// Sentinel for "heat has no sub-rounds". SQLite treats NULLs as
/// distinct inside a primary key, which would break the upsert-by-
/// identity rule, so slotless records share this value instead.
const NO_SLOT: i64 = -1;

fn slot_to_db(slot: Option<i64>) -> i64 {
    slot.unwrap_or(NO_SLOT)
}

fn slot_from_db(slot: i64) -> Option<i64> {
    (slot != NO_SLOT).then_some(slot)
}

#[derive(FromRow)]
struct DirtyScoreRow {
    judge_id: i64,
    heat: i64,
    slot: i64,
    score: String,
    comments: String,
    good: String,
    bad: String,
    student_id: Option<i64>,
    person_id: Option<i64>,
    revision: i64,
}

impl DirtyScoreRow {
    fn into_pending(self) -> Result<PendingScore, AppError> {
        let judge = JudgeId::new(self.judge_id).map_err(AppError::Storage)?;
        Ok(PendingScore {
            key: ScoreKey::new(judge, self.heat, slot_from_db(self.slot)),
            revision: self.revision,
            record: DirtyScoreRecord {
                score: self.score,
                comments: self.comments,
                good: self.good,
                bad: self.bad,
                student_id: self.student_id,
                person_id: self.person_id,
            },
        })
    }
}

/// SQLite-backed durable store for the dirty-score queue and the cached
/// version fingerprint. One database per installation; all state is
/// judge-scoped by column.
pub struct SqliteScoreStore {
    pool: Pool<Sqlite>,
}

impl SqliteScoreStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreStore for SqliteScoreStore {
    async fn add_dirty_score(
        &self,
        key: &ScoreKey,
        record: &DirtyScoreRecord,
    ) -> Result<(), AppError> {
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO dirty_scores (
                judge_id, heat, slot, score, comments, good, bad,
                student_id, person_id, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            ON CONFLICT(judge_id, heat, slot) DO UPDATE SET
                score = excluded.score,
                comments = excluded.comments,
                good = excluded.good,
                bad = excluded.bad,
                student_id = excluded.student_id,
                person_id = excluded.person_id,
                revision = dirty_scores.revision + 1,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key.judge.as_i64())
        .bind(key.heat)
        .bind(slot_to_db(key.slot))
        .bind(&record.score)
        .bind(&record.comments)
        .bind(&record.good)
        .bind(&record.bad)
        .bind(record.student_id)
        .bind(record.person_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_dirty_score(&self, key: &ScoreKey) -> Result<Option<DirtyScoreRecord>, AppError> {
        let row = sqlx::query_as::<_, DirtyScoreRow>(
            r#"
            SELECT judge_id, heat, slot, score, comments, good, bad,
                   student_id, person_id, revision
            FROM dirty_scores
            WHERE judge_id = ?1 AND heat = ?2 AND slot = ?3
            "#,
        )
        .bind(key.judge.as_i64())
        .bind(key.heat)
        .bind(slot_to_db(key.slot))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_pending()).transpose()?.map(|p| p.record))
    }

    async fn get_dirty_scores(&self, judge: &JudgeId) -> Result<Vec<PendingScore>, AppError> {
        let rows = sqlx::query_as::<_, DirtyScoreRow>(
            r#"
            SELECT judge_id, heat, slot, score, comments, good, bad,
                   student_id, person_id, revision
            FROM dirty_scores
            WHERE judge_id = ?1
            "#,
        )
        .bind(judge.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DirtyScoreRow::into_pending).collect()
    }

    async fn remove_dirty_score(&self, key: &ScoreKey, revision: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            DELETE FROM dirty_scores
            WHERE judge_id = ?1 AND heat = ?2 AND slot = ?3 AND revision <= ?4
            "#,
        )
        .bind(key.judge.as_i64())
        .bind(key.heat)
        .bind(slot_to_db(key.slot))
        .bind(revision)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_dirty_scores(&self, judge: &JudgeId) -> Result<(), AppError> {
        sqlx::query("DELETE FROM dirty_scores WHERE judge_id = ?1")
            .bind(judge.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn dirty_score_count(&self, judge: &JudgeId) -> Result<u64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM dirty_scores WHERE judge_id = ?1")
            .bind(judge.as_i64())
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count.max(0) as u64)
    }

    async fn cached_version(
        &self,
        judge: &JudgeId,
    ) -> Result<Option<VersionFingerprint>, AppError> {
        let row = sqlx::query(
            "SELECT max_updated_at, heat_count FROM cached_version WHERE judge_id = ?1",
        )
        .bind(judge.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(VersionFingerprint::new(
                row.try_get("max_updated_at")?,
                row.try_get("heat_count")?,
            ))
        })
        .transpose()
        .map_err(|err: sqlx::Error| err.into())
    }

    async fn set_cached_version(
        &self,
        judge: &JudgeId,
        fingerprint: &VersionFingerprint,
    ) -> Result<(), AppError> {
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO cached_version (judge_id, max_updated_at, heat_count, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(judge_id) DO UPDATE SET
                max_updated_at = excluded.max_updated_at,
                heat_count = excluded.heat_count,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(judge.as_i64())
        .bind(&fingerprint.max_updated_at)
        .bind(fingerprint.heat_count)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
