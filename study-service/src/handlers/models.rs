use crate::dtos::{ModelListResponse, ModelRecommendations, FREE_TIER_MODELS};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

const QUOTA_NOTE: &str =
    "This endpoint consumes a request from your provider quota. Call it only when needed.";

/// List provider models that support text generation.
///
/// Every call spends provider quota; nothing gates it beyond this note.
pub async fn list_models(State(state): State<AppState>) -> Result<Json<ModelListResponse>, AppError> {
    let client = state.provider.client()?;

    let models = client.list_models().await.map_err(|e| {
        tracing::error!(error = %e, "Error listing models");
        AppError::InternalError(anyhow::Error::new(e).context("Error listing models"))
    })?;

    let available_models = models
        .into_iter()
        .filter(|m| m.supports_generate_content())
        .collect();

    Ok(Json(ModelListResponse {
        available_models,
        recommendations: ModelRecommendations {
            current_model: state.config.gemini.model.clone(),
            recommended_free_tier: FREE_TIER_MODELS.to_vec(),
        },
        note: QUOTA_NOTE,
    }))
}
