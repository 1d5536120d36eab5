// Integration tests for the OpenAI-compatible client
//
// A local axum server stands in for the chat completions endpoint so the tests
// exercise the real HTTP path: request shape, status handling and payload
// extraction.

mod common;

use anyhow::Result;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use common::valid_payload;
use practice_report::client::OpenAiSettings;
use practice_report::{OpenAiClient, ReportClient, ReportError, ReportPrompt};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct FakeModel {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn chat_completions(
    State(model): State<FakeModel>,
    headers: axum::http::HeaderMap,
    Json(request): Json<Value>,
) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    model.seen.lock().unwrap().push((auth, request));
    (
        model.status,
        [("content-type", "application/json")],
        model.body.clone(),
    )
}

/// Serve `body` with `status` on a random local port; returns the base URL
async fn spawn_model(status: StatusCode, body: String) -> Result<(String, FakeModel)> {
    let model = FakeModel {
        status,
        body,
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(model.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((format!("http://{}/v1", addr), model))
}

fn client(base_url: String) -> OpenAiClient {
    OpenAiClient::new(OpenAiSettings {
        base_url,
        api_key: "test-key".to_string(),
        model: "gpt-4o-mini".to_string(),
        temperature: 0.7,
        max_tokens: 2000,
    })
}

fn prompt() -> ReportPrompt {
    ReportPrompt {
        system: "You are a tutor.".to_string(),
        user: "Transcript:\nYou: Hi".to_string(),
    }
}

fn function_call_envelope(arguments: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "function_call": { "name": "generate_report", "arguments": arguments }
            },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_returns_structured_payload() -> Result<()> {
    let arguments = valid_payload(72).to_string();
    let (url, model) = spawn_model(StatusCode::OK, function_call_envelope(&arguments)).await?;

    let value = client(url).request_structured_report(&prompt()).await?;
    assert_eq!(value, valid_payload(72));

    let seen = model.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, request) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(request["model"], "gpt-4o-mini");
    assert_eq!(request["messages"][0]["content"], "You are a tutor.");
    assert_eq!(request["messages"][1]["role"], "user");
    assert_eq!(request["response_format"]["type"], "json_object");
    assert_eq!(request["function_call"]["name"], "generate_report");
    assert_eq!(
        request["functions"][0]["parameters"]["required"],
        json!(["score", "metrics", "feedback", "summary", "tone"])
    );
    Ok(())
}

#[tokio::test]
async fn test_http_failure_is_transport_error() -> Result<()> {
    let body = json!({ "error": { "message": "rate limited" } }).to_string();
    let (url, _) = spawn_model(StatusCode::TOO_MANY_REQUESTS, body).await?;

    let err = client(url).request_structured_report(&prompt()).await.unwrap_err();
    match err {
        ReportError::Transport { status, message } => {
            assert_eq!(status, Some(429));
            assert!(message.contains("429"));
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() -> Result<()> {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let err = client(format!("http://{}/v1", addr))
        .request_structured_report(&prompt())
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::Transport { status: None, .. }));
    Ok(())
}

#[tokio::test]
async fn test_invalid_arguments_are_malformed_payload() -> Result<()> {
    let (url, _) = spawn_model(StatusCode::OK, function_call_envelope("{\"score\": 7")).await?;

    let err = client(url).request_structured_report(&prompt()).await.unwrap_err();
    assert!(matches!(err, ReportError::MalformedPayload(_)));
    Ok(())
}

#[tokio::test]
async fn test_free_text_reply_is_transport_error() -> Result<()> {
    let body = json!({
        "choices": [{ "message": { "role": "assistant", "content": "Great job!" } }]
    })
    .to_string();
    let (url, _) = spawn_model(StatusCode::OK, body).await?;

    let err = client(url).request_structured_report(&prompt()).await.unwrap_err();
    assert!(matches!(err, ReportError::Transport { .. }));
    assert!(err.to_string().contains("missing structured payload"));
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_payload_is_returned_unvalidated() -> Result<()> {
    let mut payload = valid_payload(72);
    payload["metrics"]["fluency"] = json!(150);
    let (url, _) = spawn_model(StatusCode::OK, function_call_envelope(&payload.to_string())).await?;

    // Range checks belong to the validator, not the client
    let value = client(url).request_structured_report(&prompt()).await?;
    assert_eq!(value["metrics"]["fluency"], 150);
    Ok(())
}
