//! Tests for `GeminiClient` against a local `wiremock` server. No real
//! network traffic is made.

#![cfg(feature = "gemini")]

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use intel_brief::{
    ExtractionClient, ExtractionRequest, Extractor, GeminiClient, GeminiConfig, IntelBriefError,
    PipelineController, Synthesizer,
};

const MODEL_PATH: &str = "/models/test-model:generateContent";

fn test_client(server: &MockServer) -> GeminiClient {
    let config = GeminiConfig::new("test-key")
        .with_model("test-model")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5));
    GeminiClient::new(config).expect("failed to build test GeminiClient")
}

fn text_response(parts: &[&str]) -> serde_json::Value {
    let parts: Vec<_> = parts.iter().map(|text| json!({ "text": text })).collect();
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn extraction_sends_schema_and_url_context() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "tools": [{ "urlContext": {} }],
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&[
            r#"{"buyer":{"name":"Michael Chen","company":"Globex"},"confidence":0.9}"#,
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ExtractionClient::new(test_client(&server));
    let result = client
        .extract(&["https://globex.com"])
        .await
        .expect("extraction should succeed");

    let buyer = result.buyer.expect("buyer patch");
    assert_eq!(buyer.name.as_deref(), Some("Michael Chen"));
    assert_eq!(buyer.company.as_deref(), Some("Globex"));
    assert!(result.seller.is_none());
    assert_eq!(result.confidence, Some(0.9));
}

#[tokio::test]
async fn extraction_request_carries_gemini_shaped_schema() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "generationConfig": { "responseSchema": { "type": "object" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&["{}"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ExtractionClient::new(test_client(&server));
    let result = client.extract(&["linkedin.com/in/sarah"]).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn server_error_maps_to_api_error_with_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "backend unavailable", "status": "INTERNAL" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = ExtractionRequest {
        prompt: "extract".to_string(),
        reference_urls: vec!["https://acme.com".to_string()],
        response_schema: json!({ "type": "object" }),
    };
    let err = client.extract(&request).await.unwrap_err();

    match err {
        IntelBriefError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "backend unavailable");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn slow_server_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response(&["late"]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = GeminiConfig::new("test-key")
        .with_model("test-model")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let client = GeminiClient::new(config).expect("client");

    let err = client.synthesize("brief please").await.unwrap_err();
    assert!(
        matches!(err, IntelBriefError::Timeout(_)),
        "expected Timeout, got: {err:?}"
    );
}

#[tokio::test]
async fn synthesis_requests_text_and_joins_parts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "text/plain" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&[
            "## 1. Buyer Snapshot\n",
            "> [!KEY_INSIGHT] Moves fast",
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let markdown = client.synthesize("brief please").await.expect("synthesis");

    assert_eq!(markdown, "## 1. Buyer Snapshot\n> [!KEY_INSIGHT] Moves fast");
}

#[tokio::test]
async fn response_without_text_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.synthesize("brief please").await.unwrap_err();

    assert!(
        matches!(err, IntelBriefError::EmptyResponse),
        "expected EmptyResponse, got: {err:?}"
    );
}

#[tokio::test]
async fn api_key_travels_in_header_not_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&["ok"])))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .synthesize("brief please")
        .await
        .expect("synthesis");

    let requests = server.received_requests().await.expect("request recording");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none(), "url: {}", requests[0].url);
    assert_eq!(
        requests[0]
            .headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok()),
        Some("test-key")
    );
}

#[tokio::test]
async fn connection_failure_does_not_expose_api_key() {
    let config = GeminiConfig::new("SECRET-KEY-123")
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(5));
    let client = GeminiClient::new(config).expect("client");
    let controller = PipelineController::new(client.clone(), client);
    controller.update_seller(|s| s.name = "Sarah Jenkins".to_string());
    controller.update_buyer(|b| b.name = "Michael Chen".to_string());

    let err = controller.analyze().await.unwrap_err();
    assert!(!err.to_string().contains("SECRET-KEY-123"), "error: {err}");
    assert!(!format!("{err:?}").contains("SECRET-KEY-123"));

    let failure = controller.last_failure().expect("failure recorded");
    assert!(!failure.message.contains("SECRET-KEY-123"), "message: {}", failure.message);
}
