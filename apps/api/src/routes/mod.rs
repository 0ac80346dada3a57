pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::generation::handlers as generation;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/generate/resume", post(generation::handle_resume))
        .route(
            "/api/v1/generate/cover-letter",
            post(generation::handle_cover_letter),
        )
        .route(
            "/api/v1/generate/interview-questions",
            post(generation::handle_interview_questions),
        )
        .route(
            "/api/v1/generate/market-insights",
            post(generation::handle_market_insights),
        )
        // Profile API
        .route("/api/v1/regions", get(profile::handle_list_regions))
        .route(
            "/api/v1/profiles/:email",
            get(profile::handle_get_profile).put(profile::handle_save_profile),
        )
        .route(
            "/api/v1/profiles/:email/premium",
            get(profile::handle_get_premium).put(profile::handle_set_premium),
        )
        // Chat API
        .route(
            "/api/v1/chat/:email/messages",
            post(chat::handle_send_message),
        )
        .route(
            "/api/v1/chat/:email/history",
            get(chat::handle_chat_history),
        )
        .route("/api/v1/chat/:email", delete(chat::handle_clear_chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::chat::session::CHAT_FALLBACK_REPLY;
    use crate::generation::fallback::fallback_resume;
    use crate::llm_client::testing::{client_with, Reply, ScriptedTransport};
    use crate::models::profile::UserProfile;
    use crate::store::{chat_key, MemoryStore, ProfileStore};

    fn app(replies: impl IntoIterator<Item = Reply>) -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(client_with(ScriptedTransport::new(replies)), store.clone());
        (build_router(state), store)
    }

    fn profile_json() -> Value {
        json!({
            "fullName": "Alex Morgan",
            "email": "alex@example.com",
            "skills": "Rust, Postgres",
            "education": "BEng Software",
            "targetRole": "Backend Engineer",
            "targetRegion": "Remote / Distributed Teams"
        })
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app([]);
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "jobnexa-api");
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_endpoint_degrades_to_fallback() {
        let (app, _) = app([]);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/generate/resume",
            Some(json!({ "profile": profile_json() })),
        )
        .await;

        let profile: UserProfile = serde_json::from_value(profile_json()).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["content"], fallback_resume(&profile));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interview_endpoint_returns_parsed_questions() {
        let (app, _) = app([Reply::body(
            r#"[{"question":"What is ownership?","answer":"Rust's memory model."}]"#,
        )]);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/generate/interview-questions",
            Some(json!({ "profile": profile_json() })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "live");
        assert_eq!(body["questions"][0]["question"], "What is ownership?");
    }

    #[tokio::test]
    async fn test_cover_letter_requires_job_description() {
        let (app, _) = app([]);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/generate/cover-letter",
            Some(json!({ "profile": profile_json(), "jobDescription": "  " })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test(start_paused = true)]
    async fn test_market_insights_live() {
        let (app, _) = app([Reply::body("* Remote hiring for Rust is steady.")]);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/generate/market-insights",
            Some(json!({ "profile": profile_json() })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "* Remote hiring for Rust is steady.");
    }

    #[tokio::test]
    async fn test_first_profile_load_creates_profile() {
        let (app, store) = app([]);

        let (status, body) =
            send(&app, Method::GET, "/api/v1/profiles/new@example.com", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "new@example.com");
        assert_eq!(body["targetRegion"], "Global (International Standard)");
        assert!(store.load_profile("new@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_then_load_profile() {
        let (app, _) = app([]);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/profiles/alex@example.com",
            Some(json!({ "profile": profile_json() })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, Method::GET, "/api/v1/profiles/alex@example.com", None).await;
        assert_eq!(body["fullName"], "Alex Morgan");
        assert_eq!(body["targetRole"], "Backend Engineer");
        assert_eq!(body["targetRegion"], "Remote / Distributed Teams");
        assert_eq!(body["phone"], "");
    }

    #[tokio::test]
    async fn test_regions_listed_in_order() {
        let (app, _) = app([]);
        let (status, body) = send(&app, Method::GET, "/api/v1/regions", None).await;
        assert_eq!(status, StatusCode::OK);
        let regions = body["regions"].as_array().unwrap();
        assert_eq!(regions.len(), 17);
        assert_eq!(regions[0], "Global (International Standard)");
        assert_eq!(regions[16], "Remote / Distributed Teams");
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let (app, _) = app([]);
        let (status, _) = send(&app, Method::GET, "/api/v1/profiles/nobody", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_premium_toggle() {
        let (app, _) = app([]);
        let uri = "/api/v1/profiles/alex@example.com/premium";

        let (_, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(body["premium"], false);

        send(&app, Method::PUT, uri, Some(json!({ "premium": true }))).await;
        let (_, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(body["premium"], true);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_failure_then_success_persists_history() {
        let (app, store) = app([
            Reply::Status(503),
            Reply::Status(503),
            Reply::Status(503),
            Reply::body("Lead with impact metrics."),
        ]);
        let uri = "/api/v1/chat/alex@example.com/messages";

        let (status, body) =
            send(&app, Method::POST, uri, Some(json!({ "message": "hi" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], CHAT_FALLBACK_REPLY);

        let (_, body) = send(&app, Method::POST, uri, Some(json!({ "message": "again" }))).await;
        assert_eq!(body["text"], "Lead with impact metrics.");

        let stored = store.load_history("alex@example.com").await.unwrap().unwrap();
        assert_eq!(stored.len(), 4); // system, hi, again, reply

        let (_, body) =
            send(&app, Method::GET, "/api/v1/chat/alex@example.com/history", None).await;
        assert_eq!(body["messages"].as_array().unwrap().len(), 4);
        assert_eq!(body["messages"][3]["role"], "assistant");
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_recovers_from_unreadable_history() {
        let (app, store) = app([Reply::body("Start with your strongest project.")]);
        store
            .set_raw(&chat_key("alex@example.com"), "not json".to_string())
            .await
            .unwrap();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/chat/alex@example.com/messages",
            Some(json!({ "message": "hi" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "Start with your strongest project.");
        let stored = store.load_history("alex@example.com").await.unwrap().unwrap();
        assert_eq!(stored.len(), 3); // system, hi, reply
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_message() {
        let (app, _) = app([]);
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/chat/alex@example.com/messages",
            Some(json!({ "message": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_chat() {
        let (app, store) = app([Reply::body("Sure thing, happy to help.")]);

        send(
            &app,
            Method::POST,
            "/api/v1/chat/alex@example.com/messages",
            Some(json!({ "message": "hello" })),
        )
        .await;
        let (status, _) =
            send(&app, Method::DELETE, "/api/v1/chat/alex@example.com", None).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(store.load_history("alex@example.com").await.unwrap().is_none());
        let (_, body) =
            send(&app, Method::GET, "/api/v1/chat/alex@example.com/history", None).await;
        assert_eq!(body["messages"], json!([]));
    }
}
