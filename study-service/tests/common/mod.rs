//! Shared setup for study-service integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use study_service::config::StudyConfig;
use study_service::services::providers::mock::MockTextProvider;
use study_service::services::providers::GenerationParams;
use study_service::services::{GenerationClient, ProviderMode};
use study_service::startup::{build_router, AppState, Application};
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";

/// Configuration for a live-mode service bound to a random local port.
pub fn live_config() -> StudyConfig {
    config_with(&[("GEMINI_API_KEY", TEST_API_KEY)])
}

/// Configuration with `CI=true` and no credential.
pub fn ci_config() -> StudyConfig {
    config_with(&[("CI", "true")])
}

pub fn config_with(vars: &[(&str, &str)]) -> StudyConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let common = CoreConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    StudyConfig::from_lookup(common, |key| vars.get(key).cloned())
        .expect("Failed to build test config")
}

pub fn live_mode(provider: Arc<MockTextProvider>) -> ProviderMode {
    ProviderMode::Live(GenerationClient::new(
        provider,
        GenerationParams::default(),
        Duration::from_secs(5),
    ))
}

/// Router in live mode backed by the given mock.
pub fn mock_router(provider: Arc<MockTextProvider>) -> Router {
    build_router(AppState::new(live_config(), live_mode(provider)))
}

/// Router in CI/test mode.
pub fn ci_router() -> Router {
    let config = ci_config();
    let provider = ProviderMode::from_config(&config).expect("Failed to select provider mode");
    build_router(AppState::new(config, provider))
}

pub async fn post_json(router: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

pub async fn post_raw(router: Router, uri: &str, body: &'static str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(router, request).await
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

/// Running server on a random port.
pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn(config: StudyConfig, provider: ProviderMode) -> TestApp {
        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build application");
        let port = app.port();

        tokio::spawn(async move {
            let _ = app.run_until_stopped().await;
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
        }
    }

    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build client")
    }
}
