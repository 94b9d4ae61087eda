//! End-to-end requests against a server on a random local port.

use std::sync::Arc;

use api::AppState;
use database::Database;
use intake::IntakeService;
use mock_brain::{Brain, FailingBrain, ScriptedBrain};
use serde_json::{json, Value};

const REPLY: &str = r#"Here you go: {"tasks": [
  {"title": "Call the supplier", "category": "Work", "estimated_time": 20, "priority": "high",
   "due_date": "2026-10-18T20:00:00", "recurrence_type": null, "recurrence_interval": null}
]}"#;

struct TestServer {
    base: String,
    client: reqwest::Client,
}

impl TestServer {
    async fn start(brain: Arc<dyn Brain>) -> Self {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let app = api::app(AppState::new(IntakeService::new(db, brain)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{}", addr),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn as_user(&self, builder: reqwest::RequestBuilder, user: &str) -> reqwest::RequestBuilder {
        builder.header("x-user-id", user)
    }
}

async fn body(response: reqwest::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start(Arc::new(ScriptedBrain::new(REPLY))).await;
    let (status, json) = body(server.client.get(server.url("/health")).send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_missing_user_is_unauthorized() {
    let server = TestServer::start(Arc::new(ScriptedBrain::new(REPLY))).await;

    let (status, json) = body(server.client.get(server.url("/api/tasks")).send().await.unwrap()).await;
    assert_eq!(status, 401);
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn test_organize_uses_routine() {
    let server = TestServer::start(Arc::new(ScriptedBrain::new(REPLY))).await;

    let (status, _) = body(
        server
            .as_user(server.client.put(server.url("/api/routine")), "alice")
            .json(&json!({"windows": [{"category": "work", "start_time": "09:00", "end_time": "18:00"}]}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);

    let (status, json) = body(
        server
            .as_user(server.client.post(server.url("/api/organize")), "alice")
            .json(&json!({
                "text": "call the supplier tonight",
                "local_time": "2026-10-18T08:00:00",
                "timezone": "America/Sao_Paulo"
            }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"][0]["due_date"], "2026-10-18T09:00:00");
    assert_eq!(json["data"][0]["category"], "work");

    let (_, listed) = body(
        server
            .as_user(server.client.get(server.url("/api/tasks")), "alice")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let (_, other) = body(
        server
            .as_user(server.client.get(server.url("/api/tasks")), "bob")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert!(other["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_brain_failure_is_generic() {
    let server = TestServer::start(Arc::new(FailingBrain::unavailable())).await;

    let (status, json) = body(
        server
            .as_user(server.client.post(server.url("/api/organize")), "alice")
            .json(&json!({"text": "buy eggs", "local_time": "2026-10-18T08:00:00"}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 502);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Could not organize your tasks. Please try again.");
}

#[tokio::test]
async fn test_task_lifecycle() {
    let server = TestServer::start(Arc::new(ScriptedBrain::new(REPLY))).await;

    let (status, created) = body(
        server
            .as_user(server.client.post(server.url("/api/tasks")), "alice")
            .json(&json!({
                "title": "Move house",
                "category": "home",
                "estimated_time": 120,
                "priority": "high",
                "local_time": "2026-10-18T08:00:00"
            }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["due_date"], Value::Null);

    let (status, child) = body(
        server
            .as_user(server.client.post(server.url("/api/tasks")), "alice")
            .json(&json!({
                "title": "Pack books",
                "category": "home",
                "estimated_time": 30,
                "priority": "medium",
                "parent_id": id
            }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(child["data"]["parent_id"], id.as_str());

    let (status, updated) = body(
        server
            .as_user(server.client.patch(server.url(&format!("/api/tasks/{}", id))), "alice")
            .json(&json!({"title": "Move flat", "status": "done"}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["data"]["title"], "Move flat");
    assert_eq!(updated["data"]["status"], "pending");

    let (status, done) = body(
        server
            .as_user(server.client.post(server.url(&format!("/api/tasks/{}/status", id))), "alice")
            .json(&json!({"done": true}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(done["data"]["status"], "done");

    // Someone else's task looks missing.
    let (status, _) = body(
        server
            .as_user(server.client.delete(server.url(&format!("/api/tasks/{}", id))), "bob")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = body(
        server
            .as_user(server.client.delete(server.url(&format!("/api/tasks/{}", id))), "alice")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);

    let (_, listed) = body(
        server
            .as_user(server.client.get(server.url("/api/tasks")), "alice")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_parent_is_bad_request() {
    let server = TestServer::start(Arc::new(ScriptedBrain::new(REPLY))).await;

    let (status, json) = body(
        server
            .as_user(server.client.post(server.url("/api/tasks")), "alice")
            .json(&json!({
                "title": "Orphan",
                "category": "home",
                "estimated_time": 10,
                "priority": "low",
                "parent_id": "missing"
            }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_stacks() {
    let server = TestServer::start(Arc::new(ScriptedBrain::new(REPLY))).await;

    let (status, stacks) = body(server.client.get(server.url("/api/stacks")).send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(stacks["data"].as_array().unwrap().len(), 3);

    let (status, applied) = body(
        server
            .as_user(server.client.post(server.url("/api/stacks/wind-down")), "alice")
            .json(&json!({"local_time": "2026-10-18T21:30:00"}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    let tasks = applied["data"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t["due_date"] == "2026-10-18T21:30:00"));

    let (status, _) = body(
        server
            .as_user(server.client.post(server.url("/api/stacks/nap-time")), "alice")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_suggestions_for_task() {
    let brain = ScriptedBrain::with_replies([
        r#"{"suggestions": [{"title": "Book movers", "category": "Home", "estimated_time": 15, "priority": "high"}]}"#,
    ]);
    let server = TestServer::start(Arc::new(brain)).await;

    let (_, created) = body(
        server
            .as_user(server.client.post(server.url("/api/tasks")), "alice")
            .json(&json!({"title": "Move house", "category": "home", "estimated_time": 60, "priority": "medium"}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, json) = body(
        server
            .as_user(server.client.post(server.url(&format!("/api/tasks/{}/suggestions", id))), "alice")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(json["data"][0]["title"], "Book movers");
}

#[tokio::test]
async fn test_routine_rejects_inverted_window() {
    let server = TestServer::start(Arc::new(ScriptedBrain::new(REPLY))).await;

    let response = server
        .as_user(server.client.put(server.url("/api/routine")), "alice")
        .json(&json!({"windows": [{"category": "work", "start_time": "18:00", "end_time": "09:00"}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
    let (_, rejected) = body(response).await;
    assert_eq!(rejected["success"], false);
    assert!(rejected["error"]
        .as_str()
        .unwrap()
        .contains("must start before it ends"));

    let (_, json) = body(
        server
            .as_user(server.client.get(server.url("/api/routine")), "alice")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_bodies_use_action_result() {
    let server = TestServer::start(Arc::new(ScriptedBrain::new(REPLY))).await;

    let response = server
        .as_user(server.client.post(server.url("/api/tasks")), "alice")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let (_, json) = body(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());

    let (status, json) = body(
        server
            .as_user(server.client.post(server.url("/api/tasks")), "alice")
            .json(&json!({"title": "Weeding", "category": "garden", "estimated_time": 10, "priority": "low"}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 422);
    assert!(json["error"].as_str().unwrap().contains("garden"));
}

#[tokio::test]
async fn test_anonymous_bad_body_is_unauthorized() {
    let server = TestServer::start(Arc::new(ScriptedBrain::new(REPLY))).await;

    let (status, json) = body(
        server
            .client
            .post(server.url("/api/tasks"))
            .json(&json!({"title": "Weeding", "category": "garden", "estimated_time": 10, "priority": "low"}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(json["success"], false);

    let (status, _) = body(
        server
            .as_user(server.client.put(server.url("/api/routine")), "  ")
            .json(&json!({"windows": []}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn test_organize_accepts_pt_br_local_time() {
    let server = TestServer::start(Arc::new(ScriptedBrain::new(REPLY))).await;

    let (status, json) = body(
        server
            .as_user(server.client.post(server.url("/api/organize")), "alice")
            .json(&json!({
                "text": "ligar para o fornecedor hoje à noite",
                "local_time": "18/10/2026, 08:30:00",
                "timezone": "America/Sao_Paulo"
            }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(json["success"], true);
    // No routine saved, so the inferred date is kept.
    assert_eq!(json["data"][0]["due_date"], "2026-10-18T20:00:00");
}
