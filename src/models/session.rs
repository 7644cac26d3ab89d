// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    catalog::{Kit, Level},
    question::PublicQuestion,
};

/// Header carrying the caller's session token between start and submit.
pub const SESSION_HEADER: &str = "x-session-token";

/// Ephemeral state bridging `start` and `submit` for one caller.
/// Consumed by value on submission so it cannot be scored twice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSession {
    pub teacher_name: String,
    pub school: String,
    pub kit: Kit,
    pub level: Level,
    pub start_time: DateTime<Utc>,
}

/// DTO for starting a test.
#[derive(Debug, Deserialize, Validate)]
pub struct StartTestRequest {
    #[validate(length(min = 1, max = 100, message = "Teacher name must be 1 to 100 characters."))]
    pub teacher_name: String,
    #[validate(length(min = 1))]
    pub school: String,
    pub kit: Kit,
    pub level: Level,
}

/// What the test taker receives on start.
#[derive(Debug, Serialize, Deserialize)]
pub struct StartTestResponse {
    pub session_token: Uuid,
    pub questions: Vec<PublicQuestion>,
    pub total: usize,
    /// Allotted minutes. Advisory only, enforced by the client.
    pub test_time: i64,
}

/// DTO for submitting a test attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitTestRequest {
    /// Answers by position. `null` marks an unanswered question.
    #[serde(default)]
    pub answers: Vec<Option<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitTestResponse {
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub result_id: i64,
}
