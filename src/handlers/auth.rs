//! Login against the spreadsheet-backed user list.
//!
//! Credential hardening is deliberately out of scope; the sheet is the
//! system of record and the SPA keeps the returned user in memory.

use crate::error::AppError;
use crate::models::User;
use crate::startup::AppState;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let users = state.sheet.fetch_users().await?;
    let email = payload.email.trim().to_lowercase();

    let found = users
        .into_iter()
        .find(|u| u.email.to_lowercase() == email && u.password == payload.password);

    match found {
        Some(user) if !user.is_active() => Err(AppError::Unauthorized(anyhow::anyhow!(
            "this user is inactive; contact an administrator"
        ))),
        Some(user) => {
            tracing::info!(email = %user.email, "User logged in");
            Ok(Json(LoginResponse { user }))
        }
        None => Err(AppError::Unauthorized(anyhow::anyhow!(
            "incorrect email or password"
        ))),
    }
}
