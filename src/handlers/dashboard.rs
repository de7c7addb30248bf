//! Dashboard metric cards.
//!
//! Figures are the fixed indicators the SPA dashboard displays; there is
//! no live aggregation behind them yet.

use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: Decimal,
    pub delta_pct: Decimal,
    pub trend: &'static str,
}

pub fn metric_cards() -> Vec<MetricCard> {
    vec![
        MetricCard {
            label: "Total revenue",
            value: Decimal::from(1_245_000),
            delta_pct: Decimal::new(125, 1),
            trend: "up",
        },
        MetricCard {
            label: "Operating expenses",
            value: Decimal::from(854_200),
            delta_pct: Decimal::new(42, 1),
            trend: "down",
        },
        MetricCard {
            label: "Net profit",
            value: Decimal::from(390_800),
            delta_pct: Decimal::new(81, 1),
            trend: "up",
        },
    ]
}

pub async fn dashboard() -> Json<Vec<MetricCard>> {
    Json(metric_cards())
}
