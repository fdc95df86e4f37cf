use crate::domain::value_objects::JudgeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite identity of a pending score: `(judge, heat, slot)`.
///
/// `slot` is `None` for heats without sub-rounds; a missing slot and an
/// explicit null are the same identity, so all queue operations collapse
/// them before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreKey {
    pub judge: JudgeId,
    pub heat: i64,
    pub slot: Option<i64>,
}

impl ScoreKey {
    pub fn new(judge: JudgeId, heat: i64, slot: Option<i64>) -> Self {
        Self { judge, heat, slot }
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            Some(slot) => write!(f, "judge {} heat {} slot {}", self.judge, self.heat, slot),
            None => write!(f, "judge {} heat {}", self.judge, self.heat),
        }
    }
}
