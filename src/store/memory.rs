// src/store/memory.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::types::Json;
use tokio::sync::RwLock;

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

#[derive(Default)]
struct Inner {
    questions: BTreeMap<(Kit, Level), Vec<Question>>,
    timings: BTreeMap<TimingKey, i64>,
    results: Vec<TestResult>,
    next_question_id: i64,
    next_result_id: i64,
}

/// Process-memory store. All state sits behind a single `RwLock`.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn add_question(&self, question: NewQuestion) -> Result<Question, AppError> {
        let mut inner = self.inner.write().await;
        inner.next_question_id += 1;
        let stored = Question {
            id: inner.next_question_id,
            kit: question.kit,
            level: question.level,
            prompt: question.prompt,
            options: Json(question.options),
            correct_answer: question.correct_answer,
        };
        inner
            .questions
            .entry((question.kit, question.level))
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        for partition in inner.questions.values_mut() {
            if let Some(pos) = partition.iter().position(|q| q.id == id) {
                partition.remove(pos);
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn list_questions(&self, kit: Kit, level: Level) -> Result<Vec<Question>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.questions.get(&(kit, level)).cloned().unwrap_or_default())
    }

    async fn all_questions(&self) -> Result<Vec<Question>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.questions.values().flatten().cloned().collect())
    }

    async fn reset_questions(&self, kit: Kit, level: Level) -> Result<u64, AppError> {
        let mut inner = self.inner.write().await;
        let removed = inner
            .questions
            .remove(&(kit, level))
            .map(|p| p.len() as u64)
            .unwrap_or(0);
        Ok(removed)
    }

    async fn get_timing(&self, key: &TimingKey) -> Result<Option<i64>, AppError> {
        Ok(self.inner.read().await.timings.get(key).copied())
    }

    async fn set_timing(&self, timing: TestTiming) -> Result<(), AppError> {
        let key = TimingKey::from(&timing);
        self.inner.write().await.timings.insert(key, timing.minutes);
        Ok(())
    }

    async fn list_timings(&self) -> Result<Vec<TestTiming>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .timings
            .iter()
            .map(|(k, minutes)| TestTiming {
                teacher_name: k.teacher_name.clone(),
                kit: k.kit,
                level: k.level,
                minutes: *minutes,
            })
            .collect())
    }

    async fn append_result(&self, result: NewResult) -> Result<TestResult, AppError> {
        let mut inner = self.inner.write().await;
        inner.next_result_id += 1;
        let stored = TestResult {
            id: inner.next_result_id,
            teacher_name: result.teacher_name,
            school: result.school,
            kit: result.kit,
            level: result.level,
            score: result.score,
            total: result.total,
            percentage: result.percentage,
            timestamp: result.timestamp,
            answers: Json(result.answers),
        };
        inner.results.push(stored.clone());
        Ok(stored)
    }

    async fn list_results(&self) -> Result<Vec<TestResult>, AppError> {
        Ok(self.inner.read().await.results.clone())
    }

    async fn clear_results(&self) -> Result<u64, AppError> {
        let mut inner = self.inner.write().await;
        let removed = inner.results.len() as u64;
        inner.results.clear();
        Ok(removed)
    }
}
