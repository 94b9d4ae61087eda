//! GroqBrain against a local fake chat-completions server.
//!
//! No network access is needed: each test binds its own server on an
//! ephemeral localhost port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use groq_brain::{Brain, BrainError, BrainRequest, GroqBrain, GroqBrainConfig};
use serde_json::{json, Value};

#[derive(Clone)]
struct FakeGroq {
    calls: Arc<AtomicUsize>,
    failures_before_success: usize,
    failure_status: StatusCode,
}

impl FakeGroq {
    fn failing(times: usize, status: StatusCode) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            failures_before_success: times,
            failure_status: status,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn completions(
    State(fake): State<FakeGroq>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let call = fake.calls.fetch_add(1, Ordering::SeqCst);
    if call < fake.failures_before_success {
        return (
            fake.failure_status,
            Json(json!({"error": {"message": "try again later", "type": "server_error"}})),
        );
    }

    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");

    (
        StatusCode::OK,
        Json(json!({
            "id": "cmpl-1",
            "model": "llama-test",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "{\"tasks\": []}"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })),
    )
}

async fn spawn_server(fake: FakeGroq) -> String {
    let app = Router::new()
        .route("/openai/v1/chat/completions", post(completions))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn brain(url: String, retries: u32) -> GroqBrain {
    let config = GroqBrainConfig::builder()
        .api_key("test-key")
        .api_url(url)
        .max_retries(retries)
        .retry_backoff_ms(5)
        .timeout_secs(5)
        .build();
    GroqBrain::new(config).unwrap()
}

#[tokio::test]
async fn test_success_first_try() {
    let fake = FakeGroq::failing(0, StatusCode::SERVICE_UNAVAILABLE);
    let url = spawn_server(fake.clone()).await;

    let response = brain(url, 2)
        .process(BrainRequest::extract_tasks("system", "buy eggs"))
        .await
        .unwrap();

    assert_eq!(response.text, "{\"tasks\": []}");
    assert_eq!(response.model.as_deref(), Some("llama-test"));
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn test_retries_transient_failures() {
    let fake = FakeGroq::failing(2, StatusCode::SERVICE_UNAVAILABLE);
    let url = spawn_server(fake.clone()).await;

    let response = brain(url, 2)
        .process(BrainRequest::extract_tasks("system", "buy eggs"))
        .await
        .unwrap();

    assert_eq!(response.text, "{\"tasks\": []}");
    assert_eq!(fake.calls(), 3);
}

#[tokio::test]
async fn test_gives_up_after_max_retries() {
    let fake = FakeGroq::failing(10, StatusCode::TOO_MANY_REQUESTS);
    let url = spawn_server(fake.clone()).await;

    let result = brain(url, 1)
        .process(BrainRequest::extract_tasks("system", "buy eggs"))
        .await;

    assert!(matches!(result, Err(BrainError::Unavailable(_))));
    assert_eq!(fake.calls(), 2);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let fake = FakeGroq::failing(10, StatusCode::BAD_REQUEST);
    let url = spawn_server(fake.clone()).await;

    let result = brain(url, 3)
        .process(BrainRequest::suggest_subtasks("Move house"))
        .await;

    match result {
        Err(BrainError::ProcessingFailed(msg)) => assert!(msg.contains("try again later")),
        other => panic!("Expected ProcessingFailed, got {:?}", other),
    }
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind and drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = brain(format!("http://{}", addr), 0)
        .process(BrainRequest::extract_tasks("system", "buy eggs"))
        .await;

    assert!(matches!(result, Err(BrainError::Network(_))));
}
