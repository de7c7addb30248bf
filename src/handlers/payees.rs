//! Payee registration and listing.

use crate::error::AppError;
use crate::models::Payee;
use crate::services::sheet_client::NewPayee;
use crate::startup::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use super::users::ListQuery;

pub async fn list_payees(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Payee>>, AppError> {
    let payees = state.sheet.fetch_payees().await?;

    let payees = match query.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => {
            let term = term.to_lowercase();
            payees
                .into_iter()
                .filter(|p| {
                    p.name.to_lowercase().contains(&term)
                        || p.vehicle_plate.to_lowercase().contains(&term)
                })
                .collect()
        }
        _ => payees,
    };

    Ok(Json(payees))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPayeeRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 11, message = "Document must be a CPF or CNPJ"))]
    pub document: String,

    #[validate(length(min = 1, message = "PIX key is required"))]
    pub pix_key: String,

    #[validate(length(min = 1, message = "Vehicle plate is required"))]
    pub vehicle_plate: String,
}

pub async fn register_payee(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayeeRequest>,
) -> Result<(StatusCode, Json<Payee>), AppError> {
    payload.validate()?;

    let input = NewPayee {
        name: payload.name.trim().to_string(),
        document: payload.document.trim().to_string(),
        pix_key: payload.pix_key.trim().to_string(),
        vehicle_plate: payload.vehicle_plate.trim().to_uppercase(),
    };

    let id = state.sheet.create_payee(&input).await?;

    tracing::info!(name = %input.name, "Payee registered");

    let payee = Payee {
        id,
        name: input.name,
        document: input.document,
        pix_key: input.pix_key,
        vehicle_plate: input.vehicle_plate,
        created_at: Some(Utc::now().date_naive()),
    };

    Ok((StatusCode::CREATED, Json(payee)))
}
