//! Feature routes: each builds one prompt and makes one provider call.

use crate::dtos::{
    ExplanationRequest, ExplanationResponse, GenerateResponse, HomeworkHelpRequest,
    HomeworkHelpResponse, PromptRequest, StudyPlanRequest, StudyPlanResponse,
    StudyQuestionRequest, StudyQuestionResponse, SummaryResponse,
};
use crate::prompts;
use crate::services::{Feature, GenerationError};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

/// Wrap a generation failure so the body names the feature and the cause.
fn generation_failure(feature: Feature, err: GenerationError) -> AppError {
    AppError::InternalError(anyhow::Error::new(err).context(feature.failure_context()))
}

async fn run(state: &AppState, feature: Feature, prompt: String) -> Result<String, AppError> {
    let client = state.provider.client()?;
    client
        .generate(feature, &prompt, None)
        .await
        .map_err(|e| generation_failure(feature, e))
}

#[tracing::instrument(skip_all, fields(feature = "generate"))]
pub async fn generate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PromptRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let prompt = prompts::free_form(&request.content, request.context.as_deref());
    let response = run(&state, Feature::Generate, prompt).await?;

    Ok(Json(GenerateResponse {
        response,
        status: "success",
    }))
}

#[tracing::instrument(skip_all, fields(feature = "explain"))]
pub async fn explain_concept(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ExplanationRequest>,
) -> Result<Json<ExplanationResponse>, AppError> {
    let prompt = prompts::explanation(&request.concept, &request.level, request.subject.as_deref());
    let explanation = run(&state, Feature::Explain, prompt).await?;

    Ok(Json(ExplanationResponse {
        explanation,
        concept: request.concept,
        level: request.level,
    }))
}

#[tracing::instrument(skip_all, fields(feature = "generate_question"))]
pub async fn generate_question(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<StudyQuestionRequest>,
) -> Result<Json<StudyQuestionResponse>, AppError> {
    let prompt = prompts::question(
        &request.subject,
        &request.topic,
        &request.difficulty,
        &request.question_type,
    );
    let question = run(&state, Feature::Question, prompt).await?;

    Ok(Json(StudyQuestionResponse {
        question,
        subject: request.subject,
        topic: request.topic,
        difficulty: request.difficulty,
        question_type: request.question_type,
    }))
}

#[tracing::instrument(skip_all, fields(feature = "study_plan"))]
pub async fn create_study_plan(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<StudyPlanRequest>,
) -> Result<Json<StudyPlanResponse>, AppError> {
    let prompt = prompts::study_plan(
        &request.subject,
        request.duration_weeks,
        request.daily_hours,
        &request.current_level,
    );
    let study_plan = run(&state, Feature::StudyPlan, prompt).await?;

    Ok(Json(StudyPlanResponse {
        study_plan,
        subject: request.subject,
        duration_weeks: request.duration_weeks,
        daily_hours: request.daily_hours,
        level: request.current_level,
    }))
}

#[tracing::instrument(skip_all, fields(feature = "summarize"))]
pub async fn summarize(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PromptRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = run(&state, Feature::Summarize, prompts::summary(&request.content)).await?;

    Ok(Json(SummaryResponse {
        summary,
        status: "success",
    }))
}

#[tracing::instrument(skip_all, fields(feature = "homework_help"))]
pub async fn homework_help(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<HomeworkHelpRequest>,
) -> Result<Json<HomeworkHelpResponse>, AppError> {
    let prompt = prompts::homework_help(&request.question, request.subject.as_deref());
    let guidance = run(&state, Feature::HomeworkHelp, prompt).await?;

    Ok(Json(HomeworkHelpResponse {
        guidance,
        question: request.question,
        subject: request.subject,
    }))
}
