use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Identifier of the judge whose queue and cache a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JudgeId(i64);

impl JudgeId {
    pub fn new(value: i64) -> Result<Self, String> {
        if value <= 0 {
            return Err("Judge ID must be a positive integer".to_string());
        }
        Ok(Self(value))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for JudgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<JudgeId> for i64 {
    fn from(id: JudgeId) -> Self {
        id.0
    }
}

impl FromStr for JudgeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("Invalid judge ID: {s}"))?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_ids() {
        assert!(JudgeId::new(0).is_err());
        assert!(JudgeId::new(-3).is_err());
        assert!(JudgeId::new(12).is_ok());
    }

    #[test]
    fn parses_from_route_segment() {
        assert_eq!("42".parse::<JudgeId>().unwrap().as_i64(), 42);
        assert!("abc".parse::<JudgeId>().is_err());
    }
}
