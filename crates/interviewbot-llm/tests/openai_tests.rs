use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};

use interviewbot_llm::{
    ChatTurn, CompletionConfig, CompletionError, CompletionRequest, CompletionService,
    OpenAiCompletion,
};

#[derive(Clone, Default)]
struct Captured {
    body: Arc<Mutex<Option<Value>>>,
    auth: Arc<Mutex<Option<String>>>,
}

/// Helper: serve `router` on an ephemeral port and return its `/v1` base URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn client(api_base: String) -> OpenAiCompletion {
    OpenAiCompletion::new(
        CompletionConfig::default()
            .with_api_key("sk-test".to_string())
            .with_api_base(api_base),
    )
    .unwrap()
}

#[tokio::test]
async fn test_complete_sends_persona_history_and_input() {
    let captured = Captured::default();

    async fn handler(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        *captured.auth.lock().unwrap() = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        *captured.body.lock().unwrap() = Some(body);
        Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Tell me about a launch." } }]
        }))
    }

    let router = Router::new()
        .route("/v1/chat/completions", post(handler))
        .with_state(captured.clone());
    let base = spawn_stub(router).await;

    let history = vec![
        ChatTurn::user("Can you interview me for the PM role?"),
        ChatTurn::assistant("Of course! Let's begin."),
    ];
    let reply = client(base)
        .complete(CompletionRequest {
            system_prompt: "You are William Thompson.",
            history: &history,
            input: "Prepare a question on User Research for a PM role.",
        })
        .await
        .unwrap();

    assert_eq!(reply, "Tell me about a launch.");
    assert_eq!(
        captured.auth.lock().unwrap().as_deref(),
        Some("Bearer sk-test")
    );

    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "gpt-4o-mini");
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "You are William Thompson.");
    assert_eq!(messages[2]["content"], "Of course! Let's begin.");
    assert_eq!(
        messages[3]["content"],
        "Prepare a question on User Research for a PM role."
    );
}

#[tokio::test]
async fn test_complete_surfaces_api_error() {
    async fn handler() -> impl IntoResponse {
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": { "message": "Rate limit reached" } })),
        )
    }

    let base = spawn_stub(Router::new().route("/v1/chat/completions", post(handler))).await;

    let err = client(base)
        .complete(CompletionRequest {
            system_prompt: "sys",
            history: &[],
            input: "hi",
        })
        .await
        .unwrap_err();

    match err {
        CompletionError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_rejects_null_content() {
    async fn handler() -> Json<Value> {
        Json(json!({ "choices": [{ "message": { "content": null } }] }))
    }

    let base = spawn_stub(Router::new().route("/v1/chat/completions", post(handler))).await;

    let err = client(base)
        .complete(CompletionRequest {
            system_prompt: "sys",
            history: &[],
            input: "hi",
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::EmptyReply));
}

#[tokio::test]
async fn test_complete_connection_refused() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{}/v1", addr))
        .complete(CompletionRequest {
            system_prompt: "sys",
            history: &[],
            input: "hi",
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::RequestFailed(_)));
}
