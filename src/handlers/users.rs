//! User registration and listing.

use crate::error::AppError;
use crate::models::{Sector, User, UserStatus};
use crate::services::sheet_client::NewUser;
use crate::startup::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub search: Option<String>,
}

/// List registered users, most recent first, optionally narrowed by a
/// case-insensitive name/email substring.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state.sheet.fetch_users().await?;

    let users = match query.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => {
            let term = term.to_lowercase();
            users
                .into_iter()
                .filter(|u| {
                    u.first_name.to_lowercase().contains(&term)
                        || u.last_name.to_lowercase().contains(&term)
                        || u.email.to_lowercase().contains(&term)
                })
                .collect()
        }
        _ => users,
    };

    Ok(Json(users))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub sector: Sector,
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload.validate()?;

    let input = NewUser {
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        email: payload.email.trim().to_string(),
        password: payload.password,
        sector: payload.sector,
    };

    let id = state.sheet.create_user(&input).await?;

    tracing::info!(email = %input.email, "User registered");

    // Echo the stored row back so the SPA can insert it without refetching.
    let user = User {
        id,
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        password: String::new(),
        sector: input.sector,
        status: UserStatus::Active,
        created_at: Some(Utc::now().date_naive()),
    };

    Ok((StatusCode::CREATED, Json(user)))
}
