//! Generative-language provider abstraction.
//!
//! The service talks to exactly one provider at a time through the
//! [`TextProvider`] trait, so the Gemini REST client and the scripted test
//! double are interchangeable.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Content filtered by provider safety settings")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result of a provider call.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    /// Generated text, `None` when the provider returned no candidates.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub max_output_tokens: i32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

impl GenerationParams {
    pub fn with_max_output_tokens(max_output_tokens: i32) -> Self {
        Self {
            max_output_tokens,
            ..Self::default()
        }
    }
}

/// A model advertised by the provider.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    pub display_name: String,
    pub description: String,
    #[serde(skip)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

/// Text generation backend. Implementations must be safe to share across
/// concurrent requests.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a single text response for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// List the models available to the configured credential.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError>;

    /// Provider name for logs and metrics.
    fn name(&self) -> &'static str;
}
