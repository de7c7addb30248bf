//! Application state, router, and server lifecycle.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::handlers::{
    app::{health_check, readiness},
    auth::login,
    dashboard::dashboard,
    payees::{list_payees, register_payee},
    protocol::{emit_receipt, receipt_totals, search_trips},
    reports::list_reports,
    settings::{get_rates, update_rates},
    summary::executive_summary,
    users::{list_users, register_user},
};
use crate::models::RateConfiguration;
use crate::services::SheetClient;
use crate::services::providers::TextProvider;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::MockTextProvider;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub sheet: Arc<SheetClient>,
    /// Settings component owning the rate configuration; handlers take a
    /// snapshot and pass it into the calculator by value.
    pub rates: Arc<RwLock<RateConfiguration>>,
    pub text_provider: Arc<dyn TextProvider>,
}

impl AppState {
    pub fn build(config: AppConfig) -> Self {
        let sheet = Arc::new(SheetClient::new(config.sheet.endpoint_url.clone()));
        let rates = Arc::new(RwLock::new(config.rates.clone()));

        // Without an API key the summary endpoint degrades to the mock
        // provider instead of failing every request.
        let text_provider: Arc<dyn TextProvider> = if config.google.api_key.is_empty() {
            tracing::warn!("GOOGLE_API_KEY not set; using mock text provider");
            Arc::new(MockTextProvider::new(true))
        } else {
            tracing::info!(model = %config.google.text_model, "Initialized Gemini text provider");
            Arc::new(GeminiTextProvider::new(GeminiConfig {
                api_key: config.google.api_key.clone(),
                model: config.google.text_model.clone(),
            }))
        };

        Self {
            config,
            sheet,
            rates,
            text_provider,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness))
        .route("/api/auth/login", post(login))
        .route("/api/users", get(list_users).post(register_user))
        .route("/api/payees", get(list_payees).post(register_payee))
        .route("/api/protocol/trips", get(search_trips))
        .route("/api/protocol/totals", get(receipt_totals))
        .route("/api/protocol/receipts", post(emit_receipt))
        .route("/api/settings/rates", get(get_rates).put(update_rates))
        .route("/api/dashboard", get(dashboard))
        .route("/api/reports", get(list_reports))
        .route("/api/reports/summary", post(executive_summary))
        // The SPA is served from another origin.
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Bind the listener (port 0 = random port for testing) and prepare
    /// shared state.
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let state = AppState::build(config);

        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Back-office service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}
