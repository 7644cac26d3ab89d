// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::AppError,
    state::AppState,
    utils::{
        hash::verify_password,
        json::AppJson,
        jwt::{ADMIN_ROLE, sign_jwt},
    },
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Checks the admin password and returns a JWT for the admin routes.
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let is_valid = verify_password(&payload.password, &state.admin_password_hash)?;

    if !is_valid {
        tracing::warn!("Rejected admin login attempt");
        return Err(AppError::AuthError("Invalid password".to_string()));
    }

    let token = sign_jwt(
        ADMIN_ROLE,
        ADMIN_ROLE,
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    tracing::info!("Admin logged in");

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
    })))
}
