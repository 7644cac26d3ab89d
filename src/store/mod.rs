// src/store/mod.rs

//! Persistence boundary for questions, timings and results.
//!
//! Handlers and services only talk to [`QuizStore`]; the concrete backend is
//! picked once in `main` and shared through `AppState`.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        catalog::{Kit, Level},
        question::{NewQuestion, Question},
        result::{NewResult, TestResult},
        timing::{TestTiming, TimingKey},
    },
};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Appends a question to its (kit, level) partition and returns it with its new id.
    async fn add_question(&self, question: NewQuestion) -> Result<Question, AppError>;

    /// Returns `false` when no question has that id.
    async fn delete_question(&self, id: i64) -> Result<bool, AppError>;

    /// Questions of one partition in insertion order.
    async fn list_questions(&self, kit: Kit, level: Level) -> Result<Vec<Question>, AppError>;

    /// Every question, ordered by kit, level, then insertion.
    async fn all_questions(&self) -> Result<Vec<Question>, AppError>;

    /// Clears a partition and returns how many questions were removed.
    async fn reset_questions(&self, kit: Kit, level: Level) -> Result<u64, AppError>;

    async fn get_timing(&self, key: &TimingKey) -> Result<Option<i64>, AppError>;

    /// Upsert: overwrites an existing value for the same key.
    async fn set_timing(&self, timing: TestTiming) -> Result<(), AppError>;

    async fn list_timings(&self) -> Result<Vec<TestTiming>, AppError>;

    async fn append_result(&self, result: NewResult) -> Result<TestResult, AppError>;

    /// All results in insertion order.
    async fn list_results(&self) -> Result<Vec<TestResult>, AppError>;

    async fn clear_results(&self) -> Result<u64, AppError>;
}
