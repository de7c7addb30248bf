//! Report catalog shown on the reports screen.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ReportCard {
    pub id: &'static str,
    pub title: &'static str,
    pub format: &'static str,
}

pub async fn list_reports() -> Json<Vec<ReportCard>> {
    Json(vec![
        ReportCard {
            id: "management_income_statement",
            title: "Management income statement (DRE)",
            format: "pdf",
        },
        ReportCard {
            id: "fleet_cost",
            title: "Fleet cost report",
            format: "pdf",
        },
    ])
}
