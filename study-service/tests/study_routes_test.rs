//! Feature route tests against a scripted provider.

mod common;

use common::{get_json, mock_router, post_json, post_raw};
use serde_json::json;
use std::sync::Arc;
use study_service::prompts::QuestionType;
use study_service::services::providers::mock::{MockBehavior, MockTextProvider};
use study_service::services::providers::ModelInfo;

#[tokio::test]
async fn explain_echoes_request_with_defaults() {
    let provider = Arc::new(MockTextProvider::responding("X"));

    let (status, body) = post_json(
        mock_router(provider.clone()),
        "/explain",
        json!({ "concept": "Photosynthesis", "level": "beginner", "subject": "Biology" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "explanation": "X", "concept": "Photosynthesis", "level": "beginner" })
    );
    assert_eq!(provider.call_count(), 1);
    assert!(provider.last_prompt().unwrap().contains("Photosynthesis"));
}

#[tokio::test]
async fn explain_defaults_level_to_intermediate() {
    let provider = Arc::new(MockTextProvider::responding("X"));

    let (status, body) = post_json(
        mock_router(provider.clone()),
        "/explain",
        json!({ "concept": "closures", "subject": "Rust" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["level"], "intermediate");
    assert!(provider.last_prompt().unwrap().contains("Subject area: Rust"));
}

#[tokio::test]
async fn study_plan_accepts_long_durations() {
    let provider = Arc::new(MockTextProvider::responding("plan"));

    let (status, body) = post_json(
        mock_router(provider.clone()),
        "/study-plan",
        json!({ "subject": "Python", "duration_weeks": 53, "daily_hours": 13 }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["duration_weeks"], 53);
    assert_eq!(body["daily_hours"], 13);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn study_plan_rejects_mistyped_field_without_calling_provider() {
    let provider = Arc::new(MockTextProvider::responding("plan"));

    let (status, body) = post_json(
        mock_router(provider.clone()),
        "/study-plan",
        json!({ "subject": "Physics", "duration_weeks": "four", "daily_hours": 2 }),
    )
    .await;

    assert_eq!(status, 422);
    assert_eq!(body["error"], "Validation error");
    assert!(body["details"].as_str().unwrap().contains("duration_weeks"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn study_plan_rejects_missing_field() {
    let provider = Arc::new(MockTextProvider::responding("plan"));

    let (status, _) = post_json(
        mock_router(provider.clone()),
        "/study-plan",
        json!({ "subject": "Python" }),
    )
    .await;

    assert_eq!(status, 422);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn missing_required_fields_never_reach_provider() {
    let provider = Arc::new(MockTextProvider::responding("X"));
    let router = mock_router(provider.clone());

    let cases = [
        ("/generate", json!({ "context": "only context" })),
        ("/explain", json!({ "level": "beginner" })),
        ("/generate-question", json!({ "subject": "Math" })),
        ("/study-plan", json!({ "duration_weeks": 2, "daily_hours": 1 })),
        ("/summarize", json!({})),
        ("/homework-help", json!({ "subject": "Math" })),
    ];

    for (uri, payload) in cases {
        let (status, _) = post_json(router.clone(), uri, payload).await;
        assert_eq!(status, 422, "{uri}");
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn study_plan_echoes_parameters() {
    let provider = Arc::new(MockTextProvider::responding("Week 1: kinematics"));

    let (status, body) = post_json(
        mock_router(provider.clone()),
        "/study-plan",
        json!({ "subject": "Physics", "duration_weeks": 4, "daily_hours": 2 }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "study_plan": "Week 1: kinematics",
            "subject": "Physics",
            "duration_weeks": 4,
            "daily_hours": 2,
            "level": "beginner"
        })
    );
    assert!(provider.last_prompt().unwrap().contains("- Total hours: 56"));
}

#[tokio::test]
async fn provider_failure_is_500_naming_feature_and_cause() {
    let provider = Arc::new(MockTextProvider::failing("quota exceeded"));

    let (status, body) = post_json(
        mock_router(provider.clone()),
        "/explain",
        json!({ "concept": "recursion" }),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Internal server error");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("Error explaining concept"));
    assert!(details.contains("quota exceeded"));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn empty_provider_text_is_500() {
    let provider = Arc::new(MockTextProvider::new(MockBehavior::Empty));

    let (status, body) = post_json(
        mock_router(provider),
        "/summarize",
        json!({ "content": "A long chapter." }),
    )
    .await;

    assert_eq!(status, 500);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("Error summarizing content"));
}

#[tokio::test]
async fn malformed_json_is_400() {
    let provider = Arc::new(MockTextProvider::responding("X"));

    let (status, _) = post_raw(mock_router(provider.clone()), "/generate", "{not json").await;

    assert_eq!(status, 400);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn generate_returns_text_and_success_status() {
    let provider = Arc::new(MockTextProvider::responding("Rust is a language."));

    let (status, body) = post_json(
        mock_router(provider.clone()),
        "/generate",
        json!({ "content": "What is Rust?", "context": "Programming" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "response": "Rust is a language.", "status": "success" }));
    assert_eq!(
        provider.last_prompt().as_deref(),
        Some("Context: Programming\n\nQuestion: What is Rust?")
    );
}

#[tokio::test]
async fn generate_without_context_sends_content_verbatim() {
    let provider = Arc::new(MockTextProvider::responding("ok"));

    post_json(
        mock_router(provider.clone()),
        "/generate",
        json!({ "content": "Hello" }),
    )
    .await;

    assert_eq!(provider.last_prompt().as_deref(), Some("Hello"));
}

#[tokio::test]
async fn question_type_selects_instructions() {
    let provider = Arc::new(MockTextProvider::responding("Q?"));

    let (status, body) = post_json(
        mock_router(provider.clone()),
        "/generate-question",
        json!({ "subject": "History", "topic": "WW1", "question_type": "true_false" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["type"], "true_false");
    assert_eq!(body["difficulty"], "medium");
    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains(QuestionType::TrueFalse.instructions()));
    assert!(!prompt.contains("## Options"));
}

#[tokio::test]
async fn unknown_question_type_falls_back_but_is_echoed() {
    let provider = Arc::new(MockTextProvider::responding("Q?"));

    let (status, body) = post_json(
        mock_router(provider.clone()),
        "/generate-question",
        json!({ "subject": "History", "topic": "WW1", "question_type": "riddle" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["type"], "riddle");
    assert!(provider
        .last_prompt()
        .unwrap()
        .contains(QuestionType::MultipleChoice.instructions()));
}

#[tokio::test]
async fn homework_help_returns_guidance() {
    let provider = Arc::new(MockTextProvider::responding("Start by isolating x."));

    let (status, body) = post_json(
        mock_router(provider.clone()),
        "/homework-help",
        json!({ "question": "Solve 2x + 3 = 7", "subject": "Algebra" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["guidance"], "Start by isolating x.");
    assert_eq!(body["question"], "Solve 2x + 3 = 7");
    assert_eq!(body["subject"], "Algebra");
    assert!(provider.last_prompt().unwrap().contains("Do NOT give the final answer"));
}

#[tokio::test]
async fn each_request_makes_exactly_one_call() {
    let provider = Arc::new(MockTextProvider::responding("X"));
    let router = mock_router(provider.clone());

    post_json(router.clone(), "/summarize", json!({ "content": "a" })).await;
    post_json(router.clone(), "/explain", json!({ "concept": "b" })).await;
    post_json(router, "/generate", json!({ "content": "c" })).await;

    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn models_lists_only_generation_capable_models() {
    let provider = Arc::new(MockTextProvider::responding("X").with_models(vec![
        ModelInfo {
            name: "models/gemini-2.0-flash".to_string(),
            display_name: "Gemini 2.0 Flash".to_string(),
            description: "Fast".to_string(),
            supported_generation_methods: vec!["generateContent".to_string()],
        },
        ModelInfo {
            name: "models/embedding-001".to_string(),
            display_name: "Embedding".to_string(),
            description: "Embeddings".to_string(),
            supported_generation_methods: vec!["embedContent".to_string()],
        },
    ]));

    let (status, body) = get_json(mock_router(provider.clone()), "/models").await;

    assert_eq!(status, 200);
    let models = body["available_models"].as_array().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0]["name"], "models/gemini-2.0-flash");
    assert_eq!(body["recommendations"]["current_model"], "gemini-2.0-flash-lite");
    assert_eq!(
        body["recommendations"]["recommended_free_tier"]
            .as_array()
            .unwrap()
            .len(),
        3
    );
    assert!(body["note"].as_str().unwrap().contains("quota"));
    assert_eq!(provider.list_models_count(), 1);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn models_failure_is_500() {
    let provider = Arc::new(MockTextProvider::failing("forbidden"));

    let (status, body) = get_json(mock_router(provider), "/models").await;

    assert_eq!(status, 500);
    assert!(body["details"].as_str().unwrap().contains("forbidden"));
}
