// src/models/timing.rs

use serde::{Deserialize, Deserializer, Serialize, de};
use sqlx::FromRow;
use validator::Validate;

use crate::models::catalog::{Kit, Level};

/// Represents the 'test_timings' table.
/// At most one row per (teacher_name, kit, level).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TestTiming {
    pub teacher_name: String,
    pub kit: Kit,
    pub level: Level,
    pub minutes: i64,
}

/// Composite lookup key for a timing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimingKey {
    pub teacher_name: String,
    pub kit: Kit,
    pub level: Level,
}

impl TimingKey {
    pub fn new(teacher_name: impl Into<String>, kit: Kit, level: Level) -> Self {
        Self {
            teacher_name: teacher_name.into(),
            kit,
            level,
        }
    }
}

impl From<&TestTiming> for TimingKey {
    fn from(t: &TestTiming) -> Self {
        TimingKey::new(t.teacher_name.clone(), t.kit, t.level)
    }
}

/// DTO for setting a teacher's allotted minutes.
#[derive(Debug, Deserialize, Validate)]
pub struct SetTimingRequest {
    #[validate(length(min = 1, max = 100))]
    pub teacher_name: String,
    pub kit: Kit,
    pub level: Level,
    /// Accepts `20` as well as `"20"`.
    #[serde(deserialize_with = "deserialize_minutes")]
    #[validate(range(min = 1, max = 600, message = "Minutes must be between 1 and 600."))]
    pub minutes: i64,
}

fn deserialize_minutes<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("minutes must be an integer, got '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_accepts_number_or_numeric_string() {
        let a: SetTimingRequest = serde_json::from_value(serde_json::json!({
            "teacher_name": "Asha", "kit": "eduplay", "level": "junior", "minutes": 20
        }))
        .unwrap();
        let b: SetTimingRequest = serde_json::from_value(serde_json::json!({
            "teacher_name": "Asha", "kit": "eduplay", "level": "junior", "minutes": " 25 "
        }))
        .unwrap();
        assert_eq!(a.minutes, 20);
        assert_eq!(b.minutes, 25);
    }

    #[test]
    fn test_minutes_rejects_garbage_and_non_positive() {
        let bad: Result<SetTimingRequest, _> = serde_json::from_value(serde_json::json!({
            "teacher_name": "Asha", "kit": "eduplay", "level": "junior", "minutes": "soon"
        }));
        assert!(bad.is_err());

        let fractional: Result<SetTimingRequest, _> = serde_json::from_value(serde_json::json!({
            "teacher_name": "Asha", "kit": "eduplay", "level": "junior", "minutes": 2.5
        }));
        assert!(fractional.is_err());

        let zero: SetTimingRequest = serde_json::from_value(serde_json::json!({
            "teacher_name": "Asha", "kit": "eduplay", "level": "junior", "minutes": 0
        }))
        .unwrap();
        assert!(zero.validate().is_err());
    }
}
