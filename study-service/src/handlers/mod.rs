//! HTTP handlers for the study service.

pub mod health;
pub mod models;
pub mod study;

use axum::http::Uri;
use service_core::error::AppError;

pub use health::{full_health_check, health_check, metrics, root};
pub use models::list_models;

/// JSON 404 for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
