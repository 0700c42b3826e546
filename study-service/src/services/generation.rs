//! Generation adapter: one prompt in, one provider call, one text out.

use crate::config::StudyConfig;
use crate::services::metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::{GenerationParams, ModelInfo, ProviderError, TextProvider};
use service_core::error::AppError;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Message returned by provider-backed routes in CI/test mode.
pub const TEST_MODE_UNAVAILABLE: &str =
    "Provider disabled in CI/test mode; only basic endpoints are available";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider returned an empty response")]
    EmptyResponse,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Feature a provider call is made for. Drives log fields, metric labels and
/// the prefix of failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Generate,
    Explain,
    Question,
    StudyPlan,
    Summarize,
    HomeworkHelp,
    HealthProbe,
}

impl Feature {
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Generate => "generate",
            Feature::Explain => "explain",
            Feature::Question => "generate_question",
            Feature::StudyPlan => "study_plan",
            Feature::Summarize => "summarize",
            Feature::HomeworkHelp => "homework_help",
            Feature::HealthProbe => "health_probe",
        }
    }

    /// Failure prefix, e.g. `Error explaining concept`.
    pub fn failure_context(&self) -> &'static str {
        match self {
            Feature::Generate => "Error generating response",
            Feature::Explain => "Error explaining concept",
            Feature::Question => "Error generating question",
            Feature::StudyPlan => "Error creating study plan",
            Feature::Summarize => "Error summarizing content",
            Feature::HomeworkHelp => "Error providing homework help",
            Feature::HealthProbe => "Error probing provider",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wraps a [`TextProvider`] with the fixed generation parameters and a
/// per-call deadline. No retries, caching or rate limiting.
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
    default_timeout: Duration,
}

impl GenerationClient {
    pub fn new(
        provider: Arc<dyn TextProvider>,
        params: GenerationParams,
        default_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            params,
            default_timeout,
        }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Issue exactly one provider call for `prompt`.
    ///
    /// `timeout` overrides the configured ceiling for this call only.
    #[tracing::instrument(skip(self, prompt, feature), fields(feature = %feature, provider = self.provider.name()))]
    pub async fn generate(
        &self,
        feature: Feature,
        prompt: &str,
        timeout: Option<Duration>,
    ) -> Result<String, GenerationError> {
        let deadline = timeout.unwrap_or(self.default_timeout);
        let started = Instant::now();

        let call = self.provider.generate(prompt, &self.params);
        let result = match tokio::time::timeout(deadline, call).await {
            Err(_) => Err(GenerationError::Timeout(deadline)),
            Ok(Err(e)) => Err(GenerationError::Provider(e)),
            Ok(Ok(response)) => {
                metrics::record_provider_call(
                    feature.label(),
                    self.provider.name(),
                    started.elapsed().as_secs_f64(),
                    response.input_tokens,
                    response.output_tokens,
                );
                match response.text {
                    Some(text) if !text.trim().is_empty() => Ok(text),
                    _ => Err(GenerationError::EmptyResponse),
                }
            }
        };

        match &result {
            Ok(text) => {
                metrics::record_generation(feature.label(), "success");
                tracing::info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    response_len = text.len(),
                    "Generation completed"
                );
            }
            Err(e) => {
                metrics::record_generation(feature.label(), "error");
                tracing::error!(error = %e, "Generation failed");
            }
        }

        result
    }

    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError> {
        Ok(self.provider.list_models().await?)
    }
}

/// Whether generation is possible in this process. Chosen once at startup.
#[derive(Clone)]
pub enum ProviderMode {
    Live(GenerationClient),
    Disabled(String),
}

impl ProviderMode {
    /// Select the mode from configuration. In CI/test mode no provider client
    /// is constructed at all.
    pub fn from_config(config: &StudyConfig) -> Result<Self, AppError> {
        if config.mode.is_test_mode() {
            tracing::info!("CI/test mode: provider initialization skipped");
            return Ok(ProviderMode::Disabled(TEST_MODE_UNAVAILABLE.to_string()));
        }

        let api_key = config.gemini.api_key.clone().ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_API_KEY environment variable is required"
            ))
        })?;

        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key,
            model: config.gemini.model.clone(),
            api_base: config.gemini.api_base.clone(),
            request_timeout: config
                .gemini
                .generation_timeout
                .max(config.gemini.health_probe_timeout),
        })
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(model = %provider.model(), "Initialized Gemini text provider");

        Ok(ProviderMode::Live(GenerationClient::new(
            Arc::new(provider),
            GenerationParams::with_max_output_tokens(config.gemini.max_output_tokens),
            config.gemini.generation_timeout,
        )))
    }

    /// The live client, or the "unavailable" error carrying the reason.
    pub fn client(&self) -> Result<&GenerationClient, AppError> {
        match self {
            ProviderMode::Live(client) => Ok(client),
            ProviderMode::Disabled(reason) => Err(AppError::ServiceUnavailable(reason.clone())),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, ProviderMode::Live(_))
    }
}
