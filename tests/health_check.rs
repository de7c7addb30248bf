//! End-to-end smoke test: bind a random port, serve, and hit /health over
//! a real socket.

use backoffice_service::config::{AppConfig, CommonConfig, GoogleConfig, SheetConfig};
use backoffice_service::models::RateConfiguration;
use backoffice_service::startup::Application;

async fn spawn_app() -> String {
    let config = AppConfig {
        common: CommonConfig { port: 0 },
        sheet: SheetConfig {
            endpoint_url: "http://127.0.0.1:9/exec".to_string(),
        },
        google: GoogleConfig {
            api_key: String::new(),
            text_model: "gemini-2.5-flash".to_string(),
        },
        rates: RateConfiguration::new("2.7".parse().unwrap(), "5.0".parse().unwrap()).unwrap(),
    };

    let app = Application::build(config).await.expect("failed to build app");
    let port = app.port();
    tokio::spawn(app.run_until_stopped());

    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn health_check_works_over_the_wire() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", address))
        .send()
        .await
        .expect("failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("invalid json body");
    assert_eq!(body["status"], "ok");
}
