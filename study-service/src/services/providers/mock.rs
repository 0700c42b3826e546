//! Scripted provider for tests.

use super::{GenerationParams, ModelInfo, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the mock does when asked to generate.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this text.
    Respond(String),
    /// Fail with an API error carrying this message.
    Fail(String),
    /// Return a response without text.
    Empty,
    /// Sleep, then return this text.
    Delayed(Duration, String),
}

/// Mock text provider that records every call it receives.
pub struct MockTextProvider {
    behavior: MockBehavior,
    models: Vec<ModelInfo>,
    calls: AtomicUsize,
    model_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            models: Vec::new(),
            calls: AtomicUsize::new(0),
            model_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Respond(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(message.into()))
    }

    pub fn with_models(mut self, models: Vec<ModelInfo>) -> Self {
        self.models = models;
        self
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `list_models` calls so far.
    pub fn list_models_count(&self) -> usize {
        self.model_calls.load(Ordering::SeqCst)
    }

    /// Prompts received, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts().pop()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let text = match &self.behavior {
            MockBehavior::Respond(text) => Some(text.clone()),
            MockBehavior::Fail(message) => return Err(ProviderError::ApiError(message.clone())),
            MockBehavior::Empty => None,
            MockBehavior::Delayed(delay, text) => {
                tokio::time::sleep(*delay).await;
                Some(text.clone())
            }
        };

        Ok(ProviderResponse {
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: text.as_ref().map_or(0, |t| t.len() as i32 / 4),
            text,
        })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        self.model_calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Fail(message) => Err(ProviderError::ApiError(message.clone())),
            _ => Ok(self.models.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
