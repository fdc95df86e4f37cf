use crate::domain::entities::VersionFingerprint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The full normalized dataset a judge scores from, as served by
/// `GET /scores/{judge}/heats.json`. Heat, people, studio and entry
/// bodies stay opaque JSON; this engine only owns their freshness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatDataset {
    #[serde(default)]
    pub event: Value,
    #[serde(default)]
    pub judge: Value,
    #[serde(default)]
    pub heats: Vec<Value>,
    #[serde(default)]
    pub people: Value,
    #[serde(default)]
    pub studios: Value,
    #[serde(default)]
    pub entries: Value,
    pub max_updated_at: String,
    pub heat_count: i64,
}

impl HeatDataset {
    pub fn fingerprint(&self) -> VersionFingerprint {
        VersionFingerprint::new(self.max_updated_at.clone(), self.heat_count)
    }
}

/// Lightweight per-heat version report from
/// `GET /scores/{judge}/version/{heat}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatVersion {
    pub heat_number: i64,
    pub max_updated_at: String,
    pub heat_count: i64,
}

impl HeatVersion {
    pub fn fingerprint(&self) -> VersionFingerprint {
        VersionFingerprint::new(self.max_updated_at.clone(), self.heat_count)
    }
}
