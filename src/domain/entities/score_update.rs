use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A partial score edit produced by the scoring UI. Only the fields the
/// user actually touched appear in `fields`; presence is significant (an
/// explicit empty string clears a field, an absent key leaves it alone),
/// which is why this stays a JSON map rather than a struct of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub heat: i64,
    #[serde(default)]
    pub slot: Option<i64>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ScoreUpdate {
    pub fn new(heat: i64, slot: Option<i64>, fields: Map<String, Value>) -> Self {
        Self { heat, slot, fields }
    }

    /// Request body for `POST /scores/{judge}/post`. The wire format keys
    /// the primary value as `score`, so a UI-side `value` key is renamed
    /// unless `score` is already present.
    pub fn to_request_body(&self) -> Value {
        let mut body = self.fields.clone();
        if !body.contains_key("score") {
            if let Some(value) = body.remove("value") {
                body.insert("score".to_string(), value);
            }
        } else {
            body.remove("value");
        }
        body.insert("heat".to_string(), Value::from(self.heat));
        if let Some(slot) = self.slot {
            body.insert("slot".to_string(), Value::from(slot));
        }
        Value::Object(body)
    }
}
