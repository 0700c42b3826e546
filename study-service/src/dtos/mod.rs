//! Request and response bodies for the study routes.
//!
//! Enumerated-looking fields (`level`, `difficulty`, `question_type`) are plain
//! strings: only presence is enforced, and out-of-set values are passed
//! through to the prompt unchanged.

use crate::config::{
    DEFAULT_CURRENT_LEVEL, DEFAULT_DIFFICULTY, DEFAULT_EXPLANATION_LEVEL, DEFAULT_QUESTION_TYPE,
};
use crate::services::providers::ModelInfo;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_explanation_level() -> String {
    DEFAULT_EXPLANATION_LEVEL.to_string()
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

fn default_question_type() -> String {
    DEFAULT_QUESTION_TYPE.to_string()
}

fn default_current_level() -> String {
    DEFAULT_CURRENT_LEVEL.to_string()
}

/// Free-form prompt, shared by `/generate` and `/summarize`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PromptRequest {
    pub content: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExplanationRequest {
    pub concept: String,
    #[serde(default = "default_explanation_level")]
    pub level: String,
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StudyQuestionRequest {
    pub subject: String,
    pub topic: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_question_type")]
    pub question_type: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StudyPlanRequest {
    pub subject: String,
    pub duration_weeks: i64,
    pub daily_hours: i64,
    #[serde(default = "default_current_level")]
    pub current_level: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HomeworkHelpRequest {
    pub question: String,
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExplanationResponse {
    pub explanation: String,
    pub concept: String,
    pub level: String,
}

#[derive(Debug, Serialize)]
pub struct StudyQuestionResponse {
    pub question: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: String,
    #[serde(rename = "type")]
    pub question_type: String,
}

#[derive(Debug, Serialize)]
pub struct StudyPlanResponse {
    pub study_plan: String,
    pub subject: String,
    pub duration_weeks: i64,
    pub daily_hours: i64,
    pub level: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HomeworkHelpResponse {
    pub guidance: String,
    pub question: String,
    pub subject: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub api_configured: bool,
}

/// `/health/full` body. Fields absent for a given outcome are omitted.
#[derive(Debug, Serialize)]
pub struct FullHealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    pub gemini_connection: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_response: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModelListResponse {
    pub available_models: Vec<ModelInfo>,
    pub recommendations: ModelRecommendations,
    pub note: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelRecommendations {
    pub current_model: String,
    pub recommended_free_tier: Vec<RecommendedModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendedModel {
    pub name: &'static str,
    pub limits: &'static str,
    pub description: &'static str,
}

pub const FREE_TIER_MODELS: [RecommendedModel; 3] = [
    RecommendedModel {
        name: "gemini-2.0-flash-lite",
        limits: "30 RPM, 1M TPM, 200 RPD",
        description: "Best cost/benefit",
    },
    RecommendedModel {
        name: "gemini-2.0-flash",
        limits: "15 RPM, 1M TPM, 200 RPD",
        description: "Higher capacity",
    },
    RecommendedModel {
        name: "gemini-2.5-flash-lite",
        limits: "15 RPM, 250k TPM, 1000 RPD",
        description: "More requests per day",
    },
];
