use crate::domain::value_objects::ScoreKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An unsynced score mutation awaiting upload.
///
/// At most one record exists per `(judge, heat, slot)`; a newer write for
/// the same identity replaces the older one wholesale. `score` is the
/// union of all scoring representations the UI produces: numeric grade,
/// radio value, rank, or a JSON-encoded multi-part breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirtyScoreRecord {
    pub score: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub good: String,
    #[serde(default)]
    pub bad: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<i64>,
}

impl DirtyScoreRecord {
    /// The record expressed as the "last known score state" shape consumed
    /// by the merge rules, with the primary value under `value`.
    pub fn to_state_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("value".to_string(), Value::String(self.score.clone()));
        map.insert("good".to_string(), Value::String(self.good.clone()));
        map.insert("bad".to_string(), Value::String(self.bad.clone()));
        map.insert("comments".to_string(), Value::String(self.comments.clone()));
        map
    }
}

/// A dirty record together with its queue identity, as read back from the
/// store for display counts and batch upload. `revision` counts rewrites
/// of the row; passing it back to `remove_dirty_score` guarantees that a
/// write landing after this read is never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingScore {
    pub key: ScoreKey,
    #[serde(default)]
    pub revision: i64,
    pub record: DirtyScoreRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_map_renames_score_to_value() {
        let record = DirtyScoreRecord {
            score: "3".into(),
            comments: "x".into(),
            good: "F".into(),
            bad: String::new(),
            student_id: None,
            person_id: None,
        };
        let state = record.to_state_map();
        assert_eq!(state.get("value"), Some(&Value::String("3".into())));
        assert!(!state.contains_key("score"));
        assert_eq!(state.get("comments"), Some(&Value::String("x".into())));
    }
}
