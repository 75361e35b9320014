pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers as interview;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Interview API
        .route("/api/interview/questions", post(interview::handle_questions))
        .route("/api/interview/feedback", post(interview::handle_feedback))
        // Resume API
        .route("/api/resume/generate", post(resume::handle_generate_resume))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::StaticTokenVerifier;
    use crate::config::{Dialect, ProviderConfig};
    use crate::llm_client::testing::{gemini_body, openai_body, MockTransport};
    use crate::llm_client::LlmClient;

    const BODY_LIMIT: usize = 1_048_576;
    const TOKEN: &str = "test-token";

    fn provider(dialect: Dialect) -> ProviderConfig {
        ProviderConfig {
            dialect,
            source: "TEST_API_KEY",
            api_key: "k".to_string(),
            base_url: "http://llm.test".to_string(),
            model: "m".to_string(),
        }
    }

    fn router(transport: Arc<MockTransport>, provider: Option<ProviderConfig>) -> Router {
        let verifier =
            StaticTokenVerifier::new(HashMap::from([(TOKEN.to_string(), "user-1".to_string())]));
        build_router(AppState {
            llm: LlmClient::new(transport, provider),
            verifier: Arc::new(verifier),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header("Authorization", format!("Bearer {TOKEN}"))
            .body(Body::from(body.to_string()))
            .expect("build request")
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("parse json")
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(MockTransport::replying(200, ""), None);
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .expect("build request");

        let response = app.oneshot(request).await.expect("router call");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_questions_require_authorization() {
        let transport = MockTransport::replying(200, openai_body("[]"));
        let app = router(transport.clone(), Some(provider(Dialect::OpenAiCompatible)));
        let request = Request::builder()
            .method("POST")
            .uri("/api/interview/questions")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"role": "SRE", "industry": "Cloud"}).to_string()))
            .expect("build request");

        let response = app.oneshot(request).await.expect("router call");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let app = router(MockTransport::replying(200, ""), None);
        let request = Request::builder()
            .method("POST")
            .uri("/api/interview/feedback")
            .header(CONTENT_TYPE, "application/json")
            .header("Authorization", "Bearer someone-else")
            .body(Body::from("{}"))
            .expect("build request");

        let response = app.oneshot(request).await.expect("router call");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_role_or_industry_is_400_without_network_call() {
        let transport = MockTransport::replying(200, openai_body("[]"));

        for body in [json!({"industry": "Retail"}), json!({"role": "Cashier"}), json!({})] {
            let app = router(transport.clone(), Some(provider(Dialect::OpenAiCompatible)));
            let response = app
                .oneshot(post_json("/api/interview/questions", body))
                .await
                .expect("router call");
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(response).await["code"], "VALIDATION_ERROR");
        }
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let transport = MockTransport::replying(200, openai_body("[]"));
        let app = router(transport.clone(), Some(provider(Dialect::OpenAiCompatible)));
        let body = json!({"role": "SRE", "industry": "Cloud", "questionCount": "many"});

        let response = app
            .oneshot(post_json("/api/interview/questions", body))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fenced_openai_questions_are_returned_unchanged() {
        let content = "```json\n[{\"id\":1,\"question\":\"Tell me about yourself\",\"type\":\"behavioral\",\"category\":\"communication\"}]\n```";
        let transport = MockTransport::replying(200, openai_body(content));
        let app = router(transport.clone(), Some(provider(Dialect::OpenAiCompatible)));

        let response = app
            .oneshot(post_json(
                "/api/interview/questions",
                json!({"role": "Engineer", "industry": "Tech"}),
            ))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(
            json["questions"],
            json!([{
                "id": 1,
                "question": "Tell me about yourself",
                "type": "behavioral",
                "category": "communication"
            }])
        );
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_free_text_questions_fall_back_to_general() {
        let transport = MockTransport::replying(
            200,
            openai_body("1. Why this role? 2. Describe a conflict you resolved."),
        );
        let app = router(transport, Some(provider(Dialect::OpenAiCompatible)));

        let response = app
            .oneshot(post_json(
                "/api/interview/questions",
                json!({"role": "Engineer", "industry": "Tech"}),
            ))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let questions = json["questions"].as_array().expect("questions array");
        assert_eq!(questions.len(), 2);
        for (i, q) in questions.iter().enumerate() {
            assert_eq!(q["id"], i as u64 + 1);
            assert_eq!(q["type"], "general");
            assert_eq!(q["category"], "general");
            assert!(!q["question"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_zero_question_count_returns_empty_array() {
        let transport = MockTransport::replying(200, openai_body("[]"));
        let app = router(transport.clone(), Some(provider(Dialect::OpenAiCompatible)));

        let response = app
            .oneshot(post_json(
                "/api/interview/questions",
                json!({"role": "Engineer", "industry": "Tech", "questionCount": 0}),
            ))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["questions"], json!([]));

        let sent = transport.last_request().expect("outbound request");
        let prompt = sent.body["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.starts_with("Generate 0 interview questions"));
    }

    #[tokio::test]
    async fn test_rate_limit_surfaces_retry_after() {
        let transport = MockTransport::replying_with_headers(
            429,
            r#"{"error":{"message":"slow down"}}"#,
            &[("retry-after", "30")],
        );
        let app = router(transport, Some(provider(Dialect::OpenAiCompatible)));

        let response = app
            .oneshot(post_json(
                "/api/interview/questions",
                json!({"role": "Engineer", "industry": "Tech"}),
            ))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let json = json_body(response).await;
        assert_eq!(json["retryAfter"], 30);
        assert!(json["message"].as_str().unwrap().contains("30 seconds"));
    }

    #[tokio::test]
    async fn test_gemini_404_names_model_settings() {
        let transport = MockTransport::replying(404, "Not Found");
        let app = router(transport, Some(provider(Dialect::Gemini)));

        let response = app
            .oneshot(post_json(
                "/api/interview/feedback",
                json!({"question": "Why?", "answer": "Because."}),
            ))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let message = json_body(response).await["message"].as_str().unwrap().to_string();
        assert!(message.contains("GEMINI_MODEL"));
    }

    #[tokio::test]
    async fn test_unconfigured_feedback_is_500_without_network_call() {
        let transport = MockTransport::replying(200, openai_body("{}"));
        let app = router(transport.clone(), None);

        let response = app
            .oneshot(post_json(
                "/api/interview/feedback",
                json!({"question": "Why us?", "answer": "Mission."}),
            ))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = json_body(response).await;
        assert_eq!(json["code"], "CONFIGURATION_ERROR");
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("GEMINI_API_KEY"));
        assert!(message.contains("OPENAI_API_KEY"));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_feedback_prose_degrades_to_placeholder() {
        let transport = MockTransport::replying(200, gemini_body("Nice story, add numbers."));
        let app = router(transport, Some(provider(Dialect::Gemini)));

        let response = app
            .oneshot(post_json(
                "/api/interview/feedback",
                json!({"question": "Biggest win?", "answer": "Shipped v2.", "role": "PM"}),
            ))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::OK);

        let feedback = &json_body(response).await["feedback"];
        assert_eq!(feedback["score"], 5);
        assert_eq!(feedback["overallFeedback"], "Nice story, add numbers.");
        assert_eq!(feedback["strengths"], json!(["You provided an answer"]));
    }

    #[tokio::test]
    async fn test_resume_markdown_is_returned() {
        let markdown = "## Summary\nSeasoned engineer.";
        let transport = MockTransport::replying(200, openai_body(markdown));
        let app = router(transport.clone(), Some(provider(Dialect::OpenAiCompatible)));

        let body = json!({
            "personalInfo": {
                "name": "Alan Turing",
                "email": "alan@example.com",
                "phone": "01234 567890",
                "location": "Manchester"
            },
            "experience": [{ "position": "Researcher", "company": "NPL", "startDate": "1945", "description": "ACE design" }],
            "education": [{ "degree": "PhD", "field": "Mathematics", "school": "Princeton", "year": "1938" }],
            "skills": ["Cryptanalysis"]
        });
        let response = app
            .oneshot(post_json("/api/resume/generate", body))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["resume"], markdown);

        let sent = transport.last_request().expect("outbound request");
        assert!(sent.body.get("max_tokens").is_none());
    }

    #[tokio::test]
    async fn test_empty_resume_text_is_still_200() {
        let transport = MockTransport::replying(200, openai_body("   "));
        let app = router(transport.clone(), Some(provider(Dialect::OpenAiCompatible)));

        let body = json!({
            "personalInfo": { "name": "A", "email": "a@b.c", "phone": "1234567890", "location": "X" },
            "experience": [{ "position": "P", "company": "C" }],
            "education": [{ "degree": "D", "school": "S" }],
            "skills": ["Rust"]
        });
        let response = app
            .oneshot(post_json("/api/resume/generate", body))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["resume"], "");
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_resume_without_skills_is_400() {
        let transport = MockTransport::replying(200, openai_body("## Resume"));
        let app = router(transport.clone(), Some(provider(Dialect::OpenAiCompatible)));

        let body = json!({
            "personalInfo": { "name": "A", "email": "a@b.c", "phone": "1234567890", "location": "X" },
            "experience": [{ "position": "P", "company": "C" }],
            "education": [{ "degree": "D", "school": "S" }],
            "skills": []
        });
        let response = app
            .oneshot(post_json("/api/resume/generate", body))
            .await
            .expect("router call");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(transport.call_count(), 0);
    }
}
