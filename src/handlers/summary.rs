//! AI-generated executive summary of the dashboard indicators.

use crate::error::AppError;
use crate::services::providers::GenerationParams;
use crate::startup::AppState;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::dashboard::metric_cards;

#[derive(Debug, Deserialize, Default)]
pub struct SummaryRequest {
    /// Reporting period to mention in the summary, e.g. "March 2026".
    #[serde(default)]
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

pub async fn executive_summary(
    State(state): State<AppState>,
    Json(payload): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let prompt = build_prompt(payload.period.as_deref());

    let params = GenerationParams {
        temperature: Some(0.4),
        max_tokens: Some(512),
        ..Default::default()
    };

    let response = state.text_provider.generate(&prompt, &params).await?;

    let summary = response
        .text
        .ok_or_else(|| AppError::BadGateway("empty response from text provider".to_string()))?;

    tracing::info!(
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Executive summary generated"
    );

    Ok(Json(SummaryResponse { summary }))
}

fn build_prompt(period: Option<&str>) -> String {
    let mut prompt = String::from(
        "Write a short executive summary for the finance dashboard of a \
         large logistics and transportation company. Keep a formal, \
         corporate tone and limit the answer to three short paragraphs.\n\n",
    );

    if let Some(period) = period {
        let _ = writeln!(prompt, "Reporting period: {}", period);
    }

    let _ = writeln!(prompt, "Current indicators (month over month):");
    for card in metric_cards() {
        let sign = if card.trend == "down" { "-" } else { "+" };
        let _ = writeln!(
            prompt,
            "- {}: R$ {} ({}{}% vs. previous month)",
            card.label, card.value, sign, card.delta_pct
        );
    }

    prompt
}
