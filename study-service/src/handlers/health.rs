use crate::config::SERVICE_NAME;
use crate::dtos::{FullHealthResponse, HealthResponse, RootResponse};
use crate::services::{Feature, ProviderMode};
use crate::startup::AppState;
use axum::{extract::State, http::header, response::IntoResponse, Json};

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "IsCoolGPT - Virtual Study Assistant",
        status: "online",
    })
}

/// Liveness probe. Reads configuration only; never calls the provider.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        api_configured: state.config.api_configured(),
    })
}

/// Readiness probe that issues one minimal provider call.
///
/// Always answers 200; a failed probe reports `status: "degraded"`.
pub async fn full_health_check(State(state): State<AppState>) -> Json<FullHealthResponse> {
    let client = match &state.provider {
        ProviderMode::Disabled(_) => {
            return Json(FullHealthResponse {
                status: "healthy",
                mode: Some("CI/Test"),
                gemini_connection: "skipped",
                test_response: None,
                error: None,
            })
        }
        ProviderMode::Live(client) => client,
    };

    let probe = client
        .generate(
            Feature::HealthProbe,
            "Test",
            Some(state.config.gemini.health_probe_timeout),
        )
        .await;

    match probe {
        Ok(text) => Json(FullHealthResponse {
            status: "healthy",
            mode: None,
            gemini_connection: "ok",
            test_response: Some(!text.is_empty()),
            error: None,
        }),
        Err(e) => {
            tracing::error!(error = %e, "Full health check failed");
            Json(FullHealthResponse {
                status: "degraded",
                mode: None,
                gemini_connection: "error",
                test_response: None,
                error: Some(e.to_string()),
            })
        }
    }
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        crate::services::metrics::get_metrics(),
    )
}
