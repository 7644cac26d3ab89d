// src/handlers/quiz.rs

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        result::LeaderboardQuery,
        session::{SESSION_HEADER, StartTestRequest, StartTestResponse, SubmitTestRequest, SubmitTestResponse},
    },
    services::{analytics, test_runner},
    state::AppState,
    utils::json::{AppJson, AppQuery},
};

/// Reads the caller's session token from the request headers.
fn session_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
}

/// Lists the schools a test can be taken for.
pub async fn list_schools(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.config.schools.clone())
}

/// Starts a test for a teacher.
///
/// * Rejects unknown schools (kit and level are checked by deserialization).
/// * Returns the questions without answer keys and the allotted minutes.
/// * Re-uses the caller's `x-session-token` when sent, so a new start replaces
///   an unfinished one; otherwise issues a fresh token.
pub async fn start_test(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(req): AppJson<StartTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !state.config.is_known_school(&req.school) {
        return Err(AppError::BadRequest(format!("Unknown school '{}'", req.school)));
    }

    let started = test_runner::start(
        state.store.as_ref(),
        state.config.default_test_minutes,
        req.teacher_name,
        req.school,
        req.kit,
        req.level,
    )
    .await?;

    let token = state.sessions.open(session_token(&headers), started.session).await;

    let total = started.questions.len();
    Ok((
        [(SESSION_HEADER, token.to_string())],
        Json(StartTestResponse {
            session_token: token,
            questions: started.questions,
            total,
            test_time: started.test_time,
        }),
    ))
}

/// Scores the caller's active test and records the result.
///
/// The session is consumed once a result is written; a second submit without
/// a new start fails with 409.
pub async fn submit_test(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(req): AppJson<SubmitTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = session_token(&headers).ok_or(AppError::NoActiveTest)?;
    let session = state.sessions.take(&token).await.ok_or(AppError::NoActiveTest)?;

    // A failed write leaves the attempt open so the caller can retry.
    let result = match test_runner::submit(state.store.as_ref(), session.clone(), req.answers).await {
        Ok(result) => result,
        Err(e) => {
            state.sessions.restore(token, session).await;
            return Err(e);
        }
    };

    Ok(Json(SubmitTestResponse {
        score: result.score,
        total: result.total,
        percentage: result.percentage,
        result_id: result.id,
    }))
}

/// Retrieves the top results by percentage (50 unless `?limit=` says otherwise).
pub async fn get_leaderboard(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LeaderboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query.limit.unwrap_or(analytics::DEFAULT_LEADERBOARD_LIMIT);
    let results = state.store.list_results().await?;

    Ok(Json(analytics::leaderboard(&results, limit)))
}
