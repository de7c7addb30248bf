//! Protocol (freight receipt) screen: plate search, totals, and receipt
//! emission.
//!
//! Trip data is fetched per request and the engine recomputes totals each
//! time; nothing is cached between calls.

use crate::error::AppError;
use crate::models::{PaymentType, ReceiptTotals, TripRecord};
use crate::services::receipts::{self, ReceiptHeader};
use crate::startup::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct TripsQuery {
    #[serde(default)]
    pub plate: String,
}

/// Trips matching the plate query. An empty query yields an empty list,
/// never the whole fleet.
pub async fn search_trips(
    State(state): State<AppState>,
    Query(query): Query<TripsQuery>,
) -> Result<Json<Vec<TripRecord>>, AppError> {
    let trips = state.sheet.fetch_trips().await?;
    let matches: Vec<TripRecord> = receipts::filter_by_plate(&trips, &query.plate)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(matches))
}

#[derive(Debug, Deserialize)]
pub struct TotalsQuery {
    #[serde(default)]
    pub plate: String,
    pub payment_type: PaymentType,
}

/// Receipt totals for the current plate query and payment type,
/// presentation-rounded. An empty or unmatched query yields all-zero
/// totals.
pub async fn receipt_totals(
    State(state): State<AppState>,
    Query(query): Query<TotalsQuery>,
) -> Result<Json<ReceiptTotals>, AppError> {
    let trips = state.sheet.fetch_trips().await?;
    let matches = receipts::filter_by_plate(&trips, &query.plate);
    let rates = state.rates.read().await.clone();

    let totals = receipts::compute_totals(&matches, &rates, query.payment_type);
    Ok(Json(totals.rounded()))
}

#[derive(Debug, Deserialize, Validate)]
pub struct EmitReceiptRequest {
    #[serde(default)]
    pub plate: String,

    pub payment_type: PaymentType,

    #[validate(length(min = 1, message = "Payee name is required"))]
    pub payee_name: String,

    #[validate(length(min = 1, message = "PIX key is required"))]
    pub pix_key: String,
}

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub totals: ReceiptTotals,
    pub receipt: String,
}

pub async fn emit_receipt(
    State(state): State<AppState>,
    Json(payload): Json<EmitReceiptRequest>,
) -> Result<Json<ReceiptResponse>, AppError> {
    payload.validate()?;

    // Reject unscoped emission before touching the trip source.
    if payload.plate.trim().is_empty() {
        return Err(AppError::Unprocessable(
            receipts::ReceiptError::EmptyPlateQuery.to_string(),
        ));
    }

    let trips = state.sheet.fetch_trips().await?;
    let rates = state.rates.read().await.clone();

    let header = ReceiptHeader {
        payee_name: payload.payee_name.trim().to_string(),
        pix_key: payload.pix_key.trim().to_string(),
        plate: payload.plate.trim().to_uppercase(),
        payment_type: payload.payment_type,
    };

    let (totals, receipt) = receipts::build_receipt(&trips, &payload.plate, &rates, &header)
        .map_err(|e| AppError::Unprocessable(e.to_string()))?;

    tracing::info!(
        plate = %header.plate,
        record_count = totals.record_count,
        "Receipt emitted"
    );

    Ok(Json(ReceiptResponse { totals, receipt }))
}
