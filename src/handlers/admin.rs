// src/handlers/admin.rs

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        catalog::{Kit, Level, Partition},
        question::{CreateQuestionRequest, NewQuestion, Question, ResetQuestionsRequest},
        result::TestResult,
        timing::{SetTimingRequest, TestTiming},
    },
    services::analytics,
    state::AppState,
    utils::{
        html::clean_html,
        json::{AppJson, AppQuery},
    },
};

/// Lists one partition with answer keys.
/// Admin only.
pub async fn list_questions(
    State(state): State<AppState>,
    AppQuery(partition): AppQuery<Partition>,
) -> Result<impl IntoResponse, AppError> {
    let questions = state
        .store
        .list_questions(partition.kit, partition.level)
        .await?;

    Ok(Json(questions))
}

/// Creates a new quiz question.
/// Admin only.
pub async fn create_question(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Only the prompt is rendered as HTML. Options and key are compared
    // verbatim against submitted answers and must stay as authored.
    let prompt = clean_html(&payload.prompt);
    if prompt.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Prompt is empty once disallowed markup is removed".to_string(),
        ));
    }

    let question = state
        .store
        .add_question(NewQuestion {
            kit: payload.kit,
            level: payload.level,
            prompt,
            options: payload.options,
            correct_answer: payload.correct_answer,
        })
        .await?;

    tracing::info!(
        "Question {} added to {}/{}",
        question.id,
        question.kit,
        question.level
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Question added successfully.",
            "id": question.id,
        })),
    ))
}

/// Deletes a quiz question by ID.
/// Admin only.
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete_question(id).await? {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Question deleted successfully.",
    })))
}

/// Clears every question of a (kit, level) partition.
/// Admin only.
pub async fn reset_questions(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ResetQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state
        .store
        .reset_questions(payload.kit, payload.level)
        .await?;

    tracing::info!("Reset {}/{}: {} questions removed", payload.kit, payload.level, removed);

    Ok(Json(json!({
        "success": true,
        "message": "Questions reset successfully.",
        "removed": removed,
    })))
}

/// Lists all stored timings.
/// Admin only.
pub async fn list_timings(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.store.list_timings().await?))
}

/// Sets (or overwrites) a teacher's allotted minutes for a kit/level.
/// Admin only.
pub async fn set_timing(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SetTimingRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    state
        .store
        .set_timing(TestTiming {
            teacher_name: payload.teacher_name,
            kit: payload.kit,
            level: payload.level,
            minutes: payload.minutes,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Timing set successfully.",
    })))
}

/// Deletes every recorded result.
/// Admin only.
pub async fn reset_leaderboard(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let removed = state.store.clear_results().await?;

    tracing::info!("Leaderboard reset: {} results removed", removed);

    Ok(Json(json!({
        "success": true,
        "message": "Leaderboard reset successfully.",
        "removed": removed,
    })))
}

/// Overall and grouped averages over all results.
/// Admin only.
pub async fn get_analysis(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let results = state.store.list_results().await?;
    Ok(Json(analytics::analysis(&results)))
}

/// Everything the admin dashboard renders in one response.
#[derive(Debug, Serialize)]
pub struct AdminData {
    /// Every kit/level partition, including empty ones.
    pub questions: BTreeMap<Kit, BTreeMap<Level, Vec<Question>>>,
    pub results: Vec<TestResult>,
    pub schools: Vec<String>,
    pub timings: Vec<TestTiming>,
}

/// Dashboard snapshot: questions, raw results, schools and timings.
/// Admin only.
pub async fn get_admin_data(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut questions: BTreeMap<Kit, BTreeMap<Level, Vec<Question>>> = Kit::ALL
        .into_iter()
        .map(|kit| (kit, Level::ALL.into_iter().map(|l| (l, Vec::new())).collect()))
        .collect();

    for q in state.store.all_questions().await? {
        questions
            .entry(q.kit)
            .or_default()
            .entry(q.level)
            .or_default()
            .push(q);
    }

    Ok(Json(AdminData {
        questions,
        results: state.store.list_results().await?,
        schools: state.config.schools.clone(),
        timings: state.store.list_timings().await?,
    }))
}
