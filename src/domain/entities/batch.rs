use crate::domain::entities::{DirtyScoreRecord, PendingScore};
use serde::{Deserialize, Serialize};

/// Identity of one score inside a batch request or response. The judge is
/// implicit: the whole batch belongs to a single judge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRef {
    pub heat: i64,
    #[serde(default)]
    pub slot: Option<i64>,
}

/// One entry of the batch-upload request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub heat: i64,
    pub slot: Option<i64>,
    pub score: String,
    pub comments: String,
    pub good: String,
    pub bad: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<i64>,
}

impl From<&PendingScore> for BatchEntry {
    fn from(pending: &PendingScore) -> Self {
        let DirtyScoreRecord {
            score,
            comments,
            good,
            bad,
            student_id,
            person_id,
        } = pending.record.clone();
        Self {
            heat: pending.key.heat,
            slot: pending.key.slot,
            score,
            comments,
            good,
            bad,
            student_id,
            person_id,
        }
    }
}

/// Per-record outcome of a batch upload. On a total request failure every
/// uploaded ref lands in `failed` and the queue is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    #[serde(default)]
    pub succeeded: Vec<ScoreRef>,
    #[serde(default)]
    pub failed: Vec<ScoreRef>,
}

impl BatchOutcome {
    pub fn all_failed(refs: Vec<ScoreRef>) -> Self {
        Self {
            succeeded: Vec::new(),
            failed: refs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }
}
