use serde::{Deserialize, Serialize};

/// Per-judge snapshot used to decide whether locally cached heat data is
/// stale: the maximum `updated_at` visible to the judge plus the heat
/// count. Both fields must match for the cache to be considered current;
/// the derived `PartialEq` is exactly that comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionFingerprint {
    pub max_updated_at: String,
    pub heat_count: i64,
}

impl VersionFingerprint {
    pub fn new(max_updated_at: String, heat_count: i64) -> Self {
        Self {
            max_updated_at,
            heat_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_field_mismatch_breaks_equality() {
        let base = VersionFingerprint::new("2026-03-01T10:00:00Z".into(), 42);
        assert_eq!(base, VersionFingerprint::new("2026-03-01T10:00:00Z".into(), 42));
        assert_ne!(base, VersionFingerprint::new("2026-03-01T10:00:01Z".into(), 42));
        assert_ne!(base, VersionFingerprint::new("2026-03-01T10:00:00Z".into(), 43));
    }
}
