//! Application startup and lifecycle management.

use crate::config::StudyConfig;
use crate::handlers;
use crate::services::ProviderMode;
use axum::http::{HeaderValue, Request};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use service_core::error::AppError;
use service_core::middleware::metrics::metrics_middleware;
use service_core::middleware::tracing::{make_request_span, request_id_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StudyConfig>,
    pub provider: ProviderMode,
}

impl AppState {
    pub fn new(config: StudyConfig, provider: ProviderMode) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }
}

/// Build the HTTP router with every route and the shared middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/health/full", get(handlers::full_health_check))
        .route("/metrics", get(handlers::metrics))
        .route("/models", get(handlers::list_models))
        .route("/generate", post(handlers::study::generate))
        .route("/explain", post(handlers::study::explain_concept))
        .route("/generate-question", post(handlers::study::generate_question))
        .route("/study-plan", post(handlers::study::create_study_plan))
        .route("/summarize", post(handlers::study::summarize))
        .route("/homework-help", post(handlers::study::homework_help))
        // MatchedPath is only known after routing
        .route_layer(from_fn(metrics_middleware))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            make_request_span(request)
        }))
        .layer(from_fn(request_id_middleware))
        .layer(cors)
}

fn cors_layer(config: &StudyConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    // Origins are checked when configuration is loaded.
    let origins = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect::<Vec<HeaderValue>>();

    layer.allow_origin(origins)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application, choosing the provider mode from configuration.
    pub async fn build(config: StudyConfig) -> Result<Self, AppError> {
        let provider = ProviderMode::from_config(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an already chosen provider mode.
    pub async fn build_with_provider(
        config: StudyConfig,
        provider: ProviderMode,
    ) -> Result<Self, AppError> {
        // port 0 = random port for testing
        let addr = config.common.socket_addr().await?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            live = provider.is_live(),
            "Study service listening"
        );

        let router = build_router(AppState::new(config, provider));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Service shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
