use service_core::observability::init_tracing;
use study_service::config::{StudyConfig, SERVICE_NAME};
use study_service::services::metrics::init_metrics;
use study_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = StudyConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        SERVICE_NAME,
        config.log_level(),
        config.otlp_endpoint.as_deref(),
    );
    init_metrics();

    if config.mode.is_test_mode() {
        tracing::warn!("Running in CI/test mode: provider-backed routes answer 503");
    }

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    application.run_until_stopped().await
}
