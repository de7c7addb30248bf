//! Router-level tests exercising the HTTP surface without a network.
//!
//! Handlers that validate their payload before touching the sheet endpoint
//! are tested here with an unroutable endpoint URL; anything that would
//! actually fetch trip or user data is out of scope for these tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use backoffice_service::config::{AppConfig, CommonConfig, GoogleConfig, SheetConfig};
use backoffice_service::models::RateConfiguration;
use backoffice_service::startup::{AppState, build_router};
use backoffice_service::services::SheetClient;
use backoffice_service::services::providers::mock::MockTextProvider;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::util::ServiceExt;

fn test_config() -> AppConfig {
    AppConfig {
        common: CommonConfig { port: 0 },
        sheet: SheetConfig {
            // Never dialed by the endpoints under test.
            endpoint_url: "http://127.0.0.1:9/exec".to_string(),
        },
        google: GoogleConfig {
            api_key: String::new(),
            text_model: "gemini-2.5-flash".to_string(),
        },
        rates: RateConfiguration::new("2.7".parse().unwrap(), "5.0".parse().unwrap()).unwrap(),
    }
}

fn test_router() -> Router {
    build_router(AppState::build(test_config()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_reports_ok() {
    let response = test_router().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "backoffice-service");
}

#[tokio::test]
async fn readiness_reports_ready_with_working_provider() {
    let response = test_router().oneshot(get("/health/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn readiness_reports_degraded_when_provider_fails() {
    let config = test_config();
    let state = AppState {
        sheet: Arc::new(SheetClient::new(config.sheet.endpoint_url.clone())),
        rates: Arc::new(RwLock::new(config.rates.clone())),
        text_provider: Arc::new(MockTextProvider::new(false)),
        config,
    };

    let response = build_router(state)
        .oneshot(get("/health/ready"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn dashboard_returns_three_metric_cards() {
    let response = test_router().oneshot(get("/api/dashboard")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let cards = body.as_array().expect("array of cards");
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0]["label"], "Total revenue");
    assert_eq!(cards[1]["trend"], "down");
}

#[tokio::test]
async fn reports_catalog_lists_both_reports() {
    let response = test_router().oneshot(get("/api/reports")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let reports = body.as_array().expect("array of reports");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["id"], "management_income_statement");
    assert_eq!(reports[1]["id"], "fleet_cost");
}

#[tokio::test]
async fn rates_start_at_configured_defaults() {
    let response = test_router()
        .oneshot(get("/api/settings/rates"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["administrative_fee_pct"], "2.7");
    assert_eq!(body["commission_fee_pct"], "5.0");
}

#[tokio::test]
async fn updated_rates_are_visible_on_subsequent_reads() {
    let router = test_router();

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/settings/rates",
            json!({"administrative_fee_pct": "3.1", "commission_fee_pct": "0"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router.oneshot(get("/api/settings/rates")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["administrative_fee_pct"], "3.1");
    assert_eq!(body["commission_fee_pct"], "0");
}

#[tokio::test]
async fn negative_rate_update_is_rejected() {
    let response = test_router()
        .oneshot(json_request(
            "PUT",
            "/api/settings/rates",
            json!({"administrative_fee_pct": "-1", "commission_fee_pct": "5.0"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("zero or positive")
    );
}

#[tokio::test]
async fn login_rejects_malformed_email_before_fetching_users() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"email": "not-an-email", "password": "secret123"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn receipt_emission_rejects_empty_plate_before_fetching_trips() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/api/protocol/receipts",
            json!({
                "plate": "   ",
                "payment_type": "cash_upfront",
                "payee_name": "Transportes Silva",
                "pix_key": "11987654321"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("no vehicle plate informed")
    );
}

#[tokio::test]
async fn receipt_emission_rejects_blank_payee_name() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/api/protocol/receipts",
            json!({
                "plate": "GQI9J96",
                "payment_type": "term",
                "payee_name": "",
                "pix_key": "11987654321"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn executive_summary_uses_configured_text_provider() {
    // Empty GOOGLE_API_KEY selects the mock provider at state build time.
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/api/reports/summary",
            json!({"period": "March 2026"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["summary"].as_str().unwrap().contains("Mock response"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = test_router().oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
