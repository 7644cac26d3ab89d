// src/services/test_runner.rs

use chrono::Utc;

use crate::{
    error::AppError,
    models::{
        catalog::{Kit, Level},
        question::PublicQuestion,
        result::{NewResult, TestResult},
        session::TestSession,
        timing::TimingKey,
    },
    services::scoring::score_answers,
    store::QuizStore,
};

/// A freshly opened test: the session to keep server-side and what the taker sees.
#[derive(Debug)]
pub struct StartedTest {
    pub session: TestSession,
    pub questions: Vec<PublicQuestion>,
    pub test_time: i64,
}

/// Allotted minutes for a teacher on a kit/level.
///
/// Falls back to `default_minutes` when nothing is stored, and also when the
/// lookup itself fails.
pub async fn allotted_minutes(store: &dyn QuizStore, key: &TimingKey, default_minutes: i64) -> i64 {
    match store.get_timing(key).await {
        Ok(Some(minutes)) => minutes,
        Ok(None) => default_minutes,
        Err(e) => {
            tracing::warn!("Timing lookup failed, using default: {}", e);
            default_minutes
        }
    }
}

/// Snapshots the current question list (answer keys stripped) and opens a session.
pub async fn start(
    store: &dyn QuizStore,
    default_minutes: i64,
    teacher_name: String,
    school: String,
    kit: Kit,
    level: Level,
) -> Result<StartedTest, AppError> {
    let questions: Vec<PublicQuestion> = store
        .list_questions(kit, level)
        .await?
        .into_iter()
        .map(PublicQuestion::from)
        .collect();

    let key = TimingKey::new(teacher_name.clone(), kit, level);
    let test_time = allotted_minutes(store, &key, default_minutes).await;

    tracing::info!(
        "Test started: {} ({}) on {}/{} with {} questions, {} minutes",
        teacher_name,
        school,
        kit,
        level,
        questions.len(),
        test_time
    );

    Ok(StartedTest {
        session: TestSession {
            teacher_name,
            school,
            kit,
            level,
            start_time: Utc::now(),
        },
        questions,
        test_time,
    })
}

/// Scores a submission and appends the result.
///
/// The session is consumed. Answers are compared by position against the
/// question list as it is *now*, which may differ from the list served at start.
pub async fn submit(
    store: &dyn QuizStore,
    session: TestSession,
    answers: Vec<Option<String>>,
) -> Result<TestResult, AppError> {
    let questions = store.list_questions(session.kit, session.level).await?;
    let outcome = score_answers(&questions, &answers);

    let result = store
        .append_result(NewResult {
            teacher_name: session.teacher_name,
            school: session.school,
            kit: session.kit,
            level: session.level,
            score: outcome.score,
            total: outcome.total,
            percentage: outcome.percentage,
            timestamp: Utc::now(),
            answers,
        })
        .await?;

    tracing::info!(
        "Test submitted: result {} for {} scored {}/{} ({}%)",
        result.id,
        result.teacher_name,
        result.score,
        result.total,
        result.percentage
    );

    Ok(result)
}
