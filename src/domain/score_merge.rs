//! Pure reconciliation rules for partial score edits.
//!
//! A scoring component only reports the fields the user touched. These
//! functions combine such a partial update with the last known score
//! state to produce the complete record that goes into the offline queue,
//! and the minimal optimistic response the UI applies without waiting for
//! the network. No I/O, no async.

use crate::domain::entities::DirtyScoreRecord;
use serde_json::{Map, Value};

/// Build the complete record to persist offline from a partial `update`
/// and the last known full score state. Resolution order for the primary
/// value: `update.score`, `update.value`, `current.value`, empty. Every
/// other field takes the update's value when the key is present (an empty
/// string is an explicit clear), otherwise falls back to `current`.
pub fn merge_for_offline(
    update: &Map<String, Value>,
    current: Option<&Map<String, Value>>,
) -> DirtyScoreRecord {
    let current = current.map(|map| normalize_field_names(map));
    let current = current.as_ref();

    let score = update
        .get("score")
        .or_else(|| update.get("value"))
        .or_else(|| current.and_then(|c| c.get("value")))
        .map(as_text)
        .unwrap_or_default();

    DirtyScoreRecord {
        score,
        comments: resolve_field(update, current, "comments"),
        good: resolve_field(update, current, "good"),
        bad: resolve_field(update, current, "bad"),
        student_id: resolve_id(update, current, "student_id"),
        person_id: resolve_id(update, current, "person_id"),
    }
}

/// The minimal object the server is expected to echo back: only fields
/// present in the update, with `score` renamed to `value`, so the UI
/// updates exactly what the user touched without guessing at unrelated
/// state.
pub fn generate_optimistic_response(update: &Map<String, Value>) -> Value {
    Value::Object(normalize_field_names(update))
}

/// Shallow copy with `score` renamed to `value`. When both keys are
/// present `value` wins and `score` is dropped. The input is never
/// mutated.
pub fn normalize_field_names(data: &Map<String, Value>) -> Map<String, Value> {
    let mut normalized = data.clone();
    if normalized.contains_key("value") {
        normalized.remove("score");
    } else if let Some(score) = normalized.remove("score") {
        normalized.insert("value".to_string(), score);
    }
    normalized
}

fn resolve_field(
    update: &Map<String, Value>,
    current: Option<&Map<String, Value>>,
    key: &str,
) -> String {
    if let Some(value) = update.get(key) {
        return as_text(value);
    }
    current
        .and_then(|c| c.get(key))
        .map(as_text)
        .unwrap_or_default()
}

fn resolve_id(
    update: &Map<String, Value>,
    current: Option<&Map<String, Value>>,
    key: &str,
) -> Option<i64> {
    update
        .get(key)
        .or_else(|| current.and_then(|c| c.get(key)))
        .and_then(Value::as_i64)
}

/// Scores arrive either as JSON strings or bare numbers depending on the
/// input control; nulls read as an explicit clear.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn merge_keeps_untouched_fields_from_current() {
        let record = merge_for_offline(
            &map(json!({"good": "F P"})),
            Some(&map(json!({"value": "3", "good": "F", "bad": "", "comments": "x"}))),
        );
        assert_eq!(record.score, "3");
        assert_eq!(record.good, "F P");
        assert_eq!(record.bad, "");
        assert_eq!(record.comments, "x");
    }

    #[test]
    fn merge_with_no_current_defaults_to_empty() {
        let record = merge_for_offline(&map(json!({"score": "G"})), None);
        assert_eq!(record.score, "G");
        assert_eq!(record.good, "");
        assert_eq!(record.bad, "");
        assert_eq!(record.comments, "");
        assert_eq!(record.student_id, None);
    }

    #[test]
    fn merge_score_beats_value_which_beats_current() {
        let current = map(json!({"value": "1"}));
        let both = merge_for_offline(&map(json!({"score": "2", "value": "3"})), Some(&current));
        assert_eq!(both.score, "2");

        let value_only = merge_for_offline(&map(json!({"value": "3"})), Some(&current));
        assert_eq!(value_only.score, "3");

        let neither = merge_for_offline(&map(json!({"good": "T"})), Some(&current));
        assert_eq!(neither.score, "1");
    }

    #[test]
    fn merge_treats_empty_string_as_explicit_clear() {
        let record = merge_for_offline(
            &map(json!({"comments": ""})),
            Some(&map(json!({"value": "4", "comments": "old note"}))),
        );
        assert_eq!(record.comments, "");
        assert_eq!(record.score, "4");
    }

    #[test]
    fn merge_accepts_current_state_keyed_by_score() {
        // Callers occasionally hand back a raw server echo, which uses
        // `score` instead of `value`.
        let record = merge_for_offline(
            &map(json!({"bad": "B"})),
            Some(&map(json!({"score": "S"}))),
        );
        assert_eq!(record.score, "S");
        assert_eq!(record.bad, "B");
    }

    #[test]
    fn merge_carries_category_scoping_ids() {
        let record = merge_for_offline(
            &map(json!({"score": "1", "student_id": 12})),
            Some(&map(json!({"person_id": 34}))),
        );
        assert_eq!(record.student_id, Some(12));
        assert_eq!(record.person_id, Some(34));
    }

    #[test]
    fn optimistic_response_contains_only_touched_fields() {
        let response = generate_optimistic_response(&map(json!({"value": "4", "good": "T"})));
        let response = response.as_object().unwrap();
        assert_eq!(response.get("value"), Some(&json!("4")));
        assert_eq!(response.get("good"), Some(&json!("T")));
        assert!(!response.contains_key("bad"));
        assert!(!response.contains_key("comments"));
    }

    #[test]
    fn optimistic_response_renames_score_to_value() {
        let response = generate_optimistic_response(&map(json!({"score": "G"})));
        assert_eq!(response, json!({"value": "G"}));
    }

    #[test]
    fn normalize_prefers_existing_value_and_never_mutates() {
        let input = map(json!({"score": "2", "value": "3", "good": "F"}));
        let normalized = normalize_field_names(&input);
        assert_eq!(normalized.get("value"), Some(&json!("3")));
        assert!(!normalized.contains_key("score"));
        // input untouched
        assert_eq!(input.get("score"), Some(&json!("2")));
    }

    #[test]
    fn numeric_scores_render_as_text() {
        let record = merge_for_offline(&map(json!({"score": 2})), None);
        assert_eq!(record.score, "2");
    }
}
