// src/store/sqlite.rs

use async_trait::async_trait;
use sqlx::{SqlitePool, types::Json};

use crate::{
    error::AppError,
    models::{
        catalog::{Kit, Level},
        question::{NewQuestion, Question},
        result::{NewResult, TestResult},
        timing::{TestTiming, TimingKey},
    },
    store::QuizStore,
};

/// Relational store on SQLite. Ids come from AUTOINCREMENT so they are
/// never reused, even after a reset.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Applies the bundled migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl QuizStore for SqliteStore {
    async fn add_question(&self, question: NewQuestion) -> Result<Question, AppError> {
        let created = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (kit, level, prompt, options, correct_answer)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, kit, level, prompt, options, correct_answer
            "#,
        )
        .bind(question.kit)
        .bind(question.level)
        .bind(question.prompt)
        .bind(Json(question.options))
        .bind(question.correct_answer)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create question: {:?}", e);
            AppError::from(e)
        })?;

        Ok(created)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete question: {:?}", e);
                AppError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_questions(&self, kit: Kit, level: Level) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, kit, level, prompt, options, correct_answer
            FROM questions
            WHERE kit = ? AND level = ?
            ORDER BY id ASC
            "#,
        )
        .bind(kit)
        .bind(level)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list questions for {}/{}: {:?}", kit, level, e);
            AppError::from(e)
        })?;

        Ok(questions)
    }

    async fn all_questions(&self) -> Result<Vec<Question>, AppError> {
        let mut questions = sqlx::query_as::<_, Question>(
            "SELECT id, kit, level, prompt, options, correct_answer FROM questions ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list all questions: {:?}", e);
            AppError::from(e)
        })?;

        // Enum order, not the lexical order SQL would give on TEXT columns.
        questions.sort_by_key(|q| (q.kit, q.level));
        Ok(questions)
    }

    async fn reset_questions(&self, kit: Kit, level: Level) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE kit = ? AND level = ?")
            .bind(kit)
            .bind(level)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to reset questions: {:?}", e);
                AppError::from(e)
            })?;

        Ok(result.rows_affected())
    }

    async fn get_timing(&self, key: &TimingKey) -> Result<Option<i64>, AppError> {
        let minutes: Option<(i64,)> = sqlx::query_as(
            "SELECT minutes FROM test_timings WHERE teacher_name = ? AND kit = ? AND level = ?",
        )
        .bind(&key.teacher_name)
        .bind(key.kit)
        .bind(key.level)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch timing for {}: {:?}", key.teacher_name, e);
            AppError::from(e)
        })?;

        Ok(minutes.map(|(m,)| m))
    }

    async fn set_timing(&self, timing: TestTiming) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO test_timings (teacher_name, kit, level, minutes)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(teacher_name, kit, level) DO UPDATE SET minutes = excluded.minutes
            "#,
        )
        .bind(timing.teacher_name)
        .bind(timing.kit)
        .bind(timing.level)
        .bind(timing.minutes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert timing: {:?}", e);
            AppError::from(e)
        })?;

        Ok(())
    }

    async fn list_timings(&self) -> Result<Vec<TestTiming>, AppError> {
        let timings = sqlx::query_as::<_, TestTiming>(
            "SELECT teacher_name, kit, level, minutes FROM test_timings ORDER BY teacher_name, kit, level",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list timings: {:?}", e);
            AppError::from(e)
        })?;

        Ok(timings)
    }

    async fn append_result(&self, result: NewResult) -> Result<TestResult, AppError> {
        let stored = sqlx::query_as::<_, TestResult>(
            r#"
            INSERT INTO results
            (teacher_name, school, kit, level, score, total, percentage, timestamp, answers)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, teacher_name, school, kit, level, score, total, percentage, timestamp, answers
            "#,
        )
        .bind(result.teacher_name)
        .bind(result.school)
        .bind(result.kit)
        .bind(result.level)
        .bind(result.score)
        .bind(result.total)
        .bind(result.percentage)
        .bind(result.timestamp)
        .bind(Json(result.answers))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save result: {:?}", e);
            AppError::from(e)
        })?;

        Ok(stored)
    }

    async fn list_results(&self) -> Result<Vec<TestResult>, AppError> {
        let results = sqlx::query_as::<_, TestResult>(
            r#"
            SELECT id, teacher_name, school, kit, level, score, total, percentage, timestamp, answers
            FROM results
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch results: {:?}", e);
            AppError::from(e)
        })?;

        Ok(results)
    }

    async fn clear_results(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM results")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to clear results: {:?}", e);
                AppError::from(e)
            })?;
        Ok(result.rows_affected())
    }
}
