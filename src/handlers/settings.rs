//! Rate configuration settings.
//!
//! Rates are session-scoped: mutated only through the explicit save
//! action here, and not persisted remotely.

use crate::error::AppError;
use crate::models::RateConfiguration;
use crate::startup::AppState;
use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Deserialize;

pub async fn get_rates(State(state): State<AppState>) -> Json<RateConfiguration> {
    Json(state.rates.read().await.clone())
}

#[derive(Debug, Deserialize)]
pub struct UpdateRatesRequest {
    pub administrative_fee_pct: Decimal,
    pub commission_fee_pct: Decimal,
}

pub async fn update_rates(
    State(state): State<AppState>,
    Json(payload): Json<UpdateRatesRequest>,
) -> Result<Json<RateConfiguration>, AppError> {
    let updated =
        RateConfiguration::new(payload.administrative_fee_pct, payload.commission_fee_pct)
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))?;

    *state.rates.write().await = updated.clone();

    tracing::info!(
        administrative_fee_pct = %updated.administrative_fee_pct,
        commission_fee_pct = %updated.commission_fee_pct,
        "Rate configuration updated"
    );

    Ok(Json(updated))
}
