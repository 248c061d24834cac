//! Exercises the Gemini client over real HTTP against a local mock server.
//! Backoff sleeps go through a manual clock, so retries are instant.

use std::sync::Arc;
use std::time::Duration;

use promptgate::{
    GeminiClient, GeminiConfig, ManualClock, RemoteCallError, ReqwestTransport, RetryPolicy,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn client(server: &MockServer, clock: Arc<ManualClock>) -> GeminiClient<ReqwestTransport, Arc<ManualClock>> {
    GeminiClient::with_parts(
        GeminiConfig::new("test-key", "gemini-2.5-flash", server.uri()),
        RetryPolicy::default(),
        ReqwestTransport::new(),
        clock,
    )
}

fn candidate_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}, "finishReason": "STOP"}],
        "modelVersion": "gemini-2.5-flash"
    })
}

#[tokio::test]
async fn sends_prompt_with_key_and_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"contents": [{"parts": [{"text": "Say hi"}]}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_reply("  Hi!  ")))
        .expect(1)
        .mount(&server)
        .await;

    let clock = Arc::new(ManualClock::new());
    let text = client(&server, clock.clone())
        .call("Say hi", Duration::from_secs(120))
        .await
        .expect("call succeeds");

    assert_eq!(text, "Hi!");
    assert!(clock.sleeps().is_empty());
}

#[tokio::test]
async fn retries_overload_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_reply("done")))
        .expect(1)
        .mount(&server)
        .await;

    let clock = Arc::new(ManualClock::new());
    let text = client(&server, clock.clone())
        .call("work", Duration::from_secs(120))
        .await
        .expect("call succeeds");

    assert_eq!(text, "done");
    assert_eq!(clock.sleeps().len(), 2);
}

#[tokio::test]
async fn quota_error_makes_a_single_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, Arc::new(ManualClock::new()))
        .call("work", Duration::from_secs(120))
        .await
        .expect_err("quota is fatal");

    assert_eq!(err, RemoteCallError::QuotaExceeded);
}

#[tokio::test]
async fn server_error_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal boom"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, Arc::new(ManualClock::new()))
        .call("work", Duration::from_secs(120))
        .await
        .expect_err("500 is fatal");

    assert_eq!(err.to_string(), "Gemini API returned 500: internal boom");
}

#[tokio::test]
async fn plain_text_reply_is_returned_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("  not json at all \n"))
        .mount(&server)
        .await;

    let text = client(&server, Arc::new(ManualClock::new()))
        .call("work", Duration::from_secs(120))
        .await
        .expect("raw text accepted");

    assert_eq!(text, "not json at all");
}

#[tokio::test]
async fn unreachable_server_surfaces_network_error() {
    // Bind and drop a listener so its port refuses connections.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        format!("http://{}", listener.local_addr().expect("addr"))
    };
    let clock = Arc::new(ManualClock::new());
    let client = GeminiClient::with_parts(
        GeminiConfig::new("test-key", "gemini-2.5-flash", uri),
        RetryPolicy::default().with_max_attempts(2),
        ReqwestTransport::new(),
        clock.clone(),
    );

    let err = client
        .call("work", Duration::from_secs(120))
        .await
        .expect_err("connection refused");

    assert!(matches!(err, RemoteCallError::Network(_)));
    let message = err.to_string().to_lowercase();
    assert!(!message.contains("test-key"));
    assert!(
        message.contains("connect") || message.contains("refused"),
        "cause missing from {message:?}"
    );
    assert_eq!(clock.sleeps().len(), 1);
}

#[tokio::test]
async fn slow_attempt_times_out_and_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidate_reply("too late"))
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_reply("on time")))
        .expect(1)
        .mount(&server)
        .await;

    let clock = Arc::new(ManualClock::new());
    let client = GeminiClient::with_parts(
        GeminiConfig::new("test-key", "gemini-2.5-flash", server.uri()),
        RetryPolicy::default().with_attempt_timeout(Duration::from_millis(100)),
        ReqwestTransport::new(),
        clock.clone(),
    );

    let text = client
        .call("work", Duration::from_secs(120))
        .await
        .expect("second attempt succeeds");

    assert_eq!(text, "on time");
    assert_eq!(clock.sleeps().len(), 1);
}

#[tokio::test]
async fn timeout_on_last_attempt_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidate_reply("too late"))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let clock = Arc::new(ManualClock::new());
    let client = GeminiClient::with_parts(
        GeminiConfig::new("test-key", "gemini-2.5-flash", server.uri()),
        RetryPolicy::default()
            .with_max_attempts(1)
            .with_attempt_timeout(Duration::from_millis(100)),
        ReqwestTransport::new(),
        clock.clone(),
    );

    let err = client
        .call("work", Duration::from_secs(120))
        .await
        .expect_err("attempt timed out");

    assert!(matches!(err, RemoteCallError::Network(_)));
    assert!(err.to_string().contains("timed out"), "got {err}");
    assert!(clock.sleeps().is_empty());
}
