// src/models/result.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

use crate::models::catalog::{Kit, Level};

/// Represents the 'results' table in the database.
/// One completed, scored test attempt. Never updated once written.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestResult {
    pub id: i64,
    pub teacher_name: String,
    pub school: String,
    pub kit: Kit,
    pub level: Level,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub timestamp: DateTime<Utc>,
    /// Submitted answers in the order they were given.
    pub answers: Json<Vec<Option<String>>>,
}

/// A scored attempt that has not been written yet.
#[derive(Debug, Clone)]
pub struct NewResult {
    pub teacher_name: String,
    pub school: String,
    pub kit: Kit,
    pub level: Level,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub timestamp: DateTime<Utc>,
    pub answers: Vec<Option<String>>,
}

/// Leaderboard row. Never carries the raw answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub teacher_name: String,
    pub school: String,
    pub kit: Kit,
    pub level: Level,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<&TestResult> for LeaderboardEntry {
    fn from(r: &TestResult) -> Self {
        Self {
            teacher_name: r.teacher_name.clone(),
            school: r.school.clone(),
            kit: r.kit,
            level: r.level,
            score: r.score,
            total: r.total,
            percentage: r.percentage,
            timestamp: r.timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

/// Count and mean percentage of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPerformance {
    pub tests: usize,
    pub average: f64,
}

/// Aggregate view for the admin panel.
/// Groups without results are absent from the maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_tests: usize,
    pub average_score: f64,
    pub school_performance: BTreeMap<String, GroupPerformance>,
    pub kit_performance: BTreeMap<Kit, GroupPerformance>,
    pub level_performance: BTreeMap<Level, GroupPerformance>,
}
