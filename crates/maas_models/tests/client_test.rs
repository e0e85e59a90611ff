//! Tests for the MaaS client against an in-process stub endpoint.
//!
//! The stub speaks just enough of the OpenAI chat completions protocol to
//! exercise authentication, request encoding and response parsing.

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use maas_core::MaasConfig;
use maas_error::{AuthError, HttpErrorKind, MaasErrorKind};
use maas_models::{CompletionClient, MaasClient, StaticToken, TokenSource};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

const TOKEN: &str = "test-token";

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn echo_completion(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "invalid credentials"}})),
        );
    }

    let prompt = body["messages"][0]["content"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    captured.requests.lock().await.push(body.clone());

    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-stub",
            "object": "chat.completion",
            "model": body["model"],
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": format!("echo: {prompt}")}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "second choice"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 3, "completion_tokens": 4, "total_tokens": 7}
        })),
    )
}

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind stub listener");
    let addr = listener.local_addr().expect("Local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Stub server");
    });
    format!("http://{addr}/v1")
}

fn config_for(endpoint: String) -> MaasConfig {
    MaasConfig::builder()
        .project_id("test-project")
        .model_id("openai/gpt-oss-20b-maas")
        .max_tokens(128u32)
        .temperature(0.5f32)
        .top_p(0.75f32)
        .endpoint(Some(endpoint))
        .build()
        .expect("Valid config")
}

fn client_for(endpoint: String, token: &str) -> MaasClient {
    let tokens = Arc::new(StaticToken::new(token).expect("Valid token"));
    MaasClient::with_token_source(config_for(endpoint), tokens)
}

async fn echo_stub() -> (String, Captured) {
    let captured = Captured::default();
    let router = Router::new()
        .route("/v1/chat/completions", post(echo_completion))
        .with_state(captured.clone());
    (spawn_stub(router).await, captured)
}

#[tokio::test]
async fn test_get_text_returns_first_choice() {
    let (endpoint, _) = echo_stub().await;
    let client = client_for(endpoint, TOKEN);

    let text = client
        .get_text("Say hello in one word")
        .await
        .expect("Query succeeds");
    assert_eq!(text, "echo: Say hello in one word");
}

#[tokio::test]
async fn test_query_returns_typed_response() {
    let (endpoint, _) = echo_stub().await;
    let client = client_for(endpoint, TOKEN);

    let completion = client.query("Say hi").await.expect("Query succeeds");
    assert_eq!(completion.choices.len(), 2);
    assert_eq!(completion.text(), Some("echo: Say hi"));
    assert_eq!(
        completion.usage.as_ref().and_then(|u| u.total_tokens),
        Some(7)
    );
    assert_eq!(completion.model.as_deref(), Some("openai/gpt-oss-20b-maas"));
}

#[tokio::test]
async fn test_query_sends_generation_parameters() {
    let (endpoint, captured) = echo_stub().await;
    let client = client_for(endpoint, TOKEN);

    client.query("What is Rust?").await.expect("Query succeeds");

    let requests = captured.requests.lock().await;
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert_eq!(sent["model"], "openai/gpt-oss-20b-maas");
    assert_eq!(sent["max_tokens"], 128);
    assert_eq!(sent["temperature"], 0.5);
    assert_eq!(sent["top_p"], 0.75);
    assert_eq!(sent["messages"][0]["role"], "user");
    assert_eq!(sent["messages"][0]["content"][0]["type"], "text");
}

#[tokio::test]
async fn test_trait_object_dispatch() {
    let (endpoint, _) = echo_stub().await;
    let client: Arc<dyn CompletionClient> = Arc::new(client_for(endpoint, TOKEN));

    assert_eq!(client.model_name(), "openai/gpt-oss-20b-maas");
    let text = client.get_text("ping").await.expect("Query succeeds");
    assert_eq!(text, "echo: ping");
}

#[tokio::test]
async fn test_rejected_token_is_auth_error() {
    let (endpoint, captured) = echo_stub().await;
    let client = client_for(endpoint, "expired-token");

    let err = client.query("Say hi").await.expect_err("Must be rejected");
    assert!(err.is_auth(), "expected auth error, got {err}");
    assert!(captured.requests.lock().await.is_empty());
}

struct NoCredentials;

#[async_trait]
impl TokenSource for NoCredentials {
    async fn access_token(&self) -> Result<String, AuthError> {
        Err(AuthError::new("credentials expired"))
    }

    fn describe(&self) -> &'static str {
        "none"
    }
}

#[tokio::test]
async fn test_missing_credentials_fail_before_request() {
    let (endpoint, captured) = echo_stub().await;
    let client = MaasClient::with_token_source(config_for(endpoint), Arc::new(NoCredentials));

    let err = client.get_text("Say hi").await.expect_err("No credentials");
    assert!(err.is_auth());
    assert!(captured.requests.lock().await.is_empty());
}

#[tokio::test]
async fn test_connect_with_unusable_credentials_is_auth_error() {
    let (endpoint, captured) = echo_stub().await;

    let err = MaasClient::connect_with(config_for(endpoint), Arc::new(NoCredentials))
        .await
        .expect_err("Credentials are checked up front");
    assert!(err.is_auth(), "expected auth error, got {err}");
    assert!(captured.requests.lock().await.is_empty());
}

#[tokio::test]
async fn test_connect_with_valid_token() {
    let (endpoint, _) = echo_stub().await;
    let tokens = Arc::new(StaticToken::new(TOKEN).expect("Valid token"));

    let client = MaasClient::connect_with(config_for(endpoint), tokens)
        .await
        .expect("Token is usable");
    assert_eq!(client.get_text("ping").await.expect("Query succeeds"), "echo: ping");
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded") }),
    );
    let client = client_for(spawn_stub(router).await, TOKEN);

    let err = client.query("Say hi").await.expect_err("500 must fail");
    match err.kind() {
        MaasErrorKind::Http(http) => {
            assert_eq!(http.status(), Some(500));
            match &http.kind {
                HttpErrorKind::Api { message, .. } => assert_eq!(message, "model overloaded"),
                other => panic!("Expected API error, got {other}"),
            }
        }
        other => panic!("Expected HTTP error, got {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::OK, "definitely not json") }),
    );
    let client = client_for(spawn_stub(router).await, TOKEN);

    let err = client.query("Say hi").await.expect_err("Bad body must fail");
    assert!(err.is_parse());
    match err.kind() {
        MaasErrorKind::Parse(parse) => assert_eq!(parse.body, "definitely not json"),
        other => panic!("Expected parse error, got {other}"),
    }
}

#[tokio::test]
async fn test_empty_choices_yield_empty_text() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let client = client_for(spawn_stub(router).await, TOKEN);

    let text = client.get_text("Say hi").await.expect("Valid response");
    assert!(text.is_empty());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind");
    let addr = listener.local_addr().expect("Local addr");
    drop(listener);

    let client = client_for(format!("http://{addr}/v1"), TOKEN);
    let err = client.query("Say hi").await.expect_err("Nothing listening");
    match err.kind() {
        MaasErrorKind::Http(http) => {
            assert!(matches!(http.kind, HttpErrorKind::Transport(_)));
            assert_eq!(http.status(), None);
        }
        other => panic!("Expected transport error, got {other}"),
    }
}

#[tokio::test]
#[ignore] // Requires an environment without any Google Cloud credentials
async fn test_connect_without_ambient_credentials() {
    let err = MaasClient::connect(MaasConfig::default())
        .await
        .expect_err("No credentials available");
    assert!(err.is_auth());
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_get_text() {
    dotenvy::dotenv().ok();
    let config = MaasConfig::from_env().expect("Valid config");
    let client = MaasClient::connect(config).await.expect("Credentials");

    let text = client
        .get_text("Say hello in one word")
        .await
        .expect("API call succeeded");
    assert!(!text.trim().is_empty());
}
