//! Completion relay handler.
//!
//! One stateless transaction per request: validate the `message` field,
//! build the fixed system/user prompt pair, forward it to the provider,
//! map the outcome to JSON. Exactly three terminal outcomes — 200, 400
//! on bad input, 500 on any upstream failure.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use super::AppContext;
use crate::provider::types::ChatMessage;

/// Fixed first turn of every prompt.
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Deserialize)]
struct ChatRequest {
    message: Option<String>,
}

/// `POST /api/chat/completions`
///
/// The body is parsed by hand so that an unparseable body, an absent
/// `message`, `null`, and `""` all get the same fixed 400 response.
pub async fn create_completion(
    State(ctx): State<Arc<AppContext>>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let message = serde_json::from_slice::<ChatRequest>(&body)
        .ok()
        .and_then(|req| req.message)
        .filter(|m| !m.is_empty());

    let Some(message) = message else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Message is required" })),
        ));
    };

    info!(chars = message.len(), "Relaying completion request");

    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(&message),
    ];

    match ctx.provider.complete(&messages).await {
        Ok(text) => Ok(Json(json!({ "response": text }))),
        Err(e) => {
            error!("Completion request failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}

/// `GET /api/chat/health`
pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": ctx.provider.model(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{CompletionProvider, ProviderError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub provider: returns a canned reply or a canned failure, and
    /// counts how many times it was called.
    struct StubProvider {
        reply: Result<String, String>,
        calls: AtomicUsize,
        seen: std::sync::Mutex<Vec<ChatMessage>>,
    }

    impl StubProvider {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.into()),
                calls: AtomicUsize::new(0),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.into()),
                calls: AtomicUsize::new(0),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = messages.to_vec();
            self.reply
                .clone()
                .map_err(ProviderError::Malformed)
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    fn ctx_with(provider: Arc<StubProvider>) -> Arc<AppContext> {
        Arc::new(AppContext::new(provider))
    }

    async fn post(ctx: Arc<AppContext>, body: &str) -> Result<Value, (StatusCode, Value)> {
        create_completion(State(ctx), Bytes::copy_from_slice(body.as_bytes()))
            .await
            .map(|Json(v)| v)
            .map_err(|(status, Json(v))| (status, v))
    }

    #[tokio::test]
    async fn test_success_returns_generated_text() {
        let provider = Arc::new(StubProvider::ok("Hi there!"));
        let body = post(ctx_with(provider.clone()), r#"{"message": "Hello"}"#)
            .await
            .unwrap();
        assert_eq!(body, json!({ "response": "Hi there!" }));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, "system");
        assert_eq!(seen[0].content, SYSTEM_PROMPT);
        assert_eq!(seen[1].role, "user");
        assert_eq!(seen[1].content, "Hello");
    }

    #[tokio::test]
    async fn test_missing_message_is_400() {
        let provider = Arc::new(StubProvider::ok("unused"));
        let (status, body) = post(ctx_with(provider.clone()), "{}").await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Message is required" }));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_message_is_400() {
        let provider = Arc::new(StubProvider::ok("unused"));
        let (status, body) = post(ctx_with(provider), r#"{"message": ""}"#)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Message is required" }));
    }

    #[tokio::test]
    async fn test_null_message_is_400() {
        let provider = Arc::new(StubProvider::ok("unused"));
        let (status, _) = post(ctx_with(provider), r#"{"message": null}"#)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparseable_body_is_400() {
        let provider = Arc::new(StubProvider::ok("unused"));
        let (status, body) = post(ctx_with(provider), "not json").await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Message is required" }));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_with_description_and_no_retry() {
        let provider = Arc::new(StubProvider::failing("request timed out"));
        let (status, body) = post(ctx_with(provider.clone()), r#"{"message": "test"}"#)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            ProviderError::Malformed("request timed out".into()).to_string()
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let provider = Arc::new(StubProvider::ok("unused"));
        let Json(body) = health(State(ctx_with(provider))).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "stub-model");
    }
}
