//! End-to-end tests for text generation over a wiremock vendor double.

mod support;

use atelier_ai::AiError;
use atelier_ai::types::{GatewayFallback, GenerateRequest};
use atelier_ai::store::MemoryStore;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(prompt: &str) -> GenerateRequest {
    GenerateRequest {
        prompt: prompt.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn generates_text_and_records_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({"model": "test-model"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(support::openai_reply("hello back", 21)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store
        .add_provider(support::openai_profile("p1", &format!("{}/v1/chat", server.uri())))
        .await;

    let reply = support::orchestrator(&store)
        .generate_text(request("hello"))
        .await
        .unwrap();

    assert_eq!(reply.text, "hello back");
    assert_eq!(reply.provider, "p1");
    assert_eq!(reply.model.as_deref(), Some("test-model"));
    assert_eq!(reply.tokens, Some(21));

    let row = store.provider("p1").await.unwrap();
    assert_eq!(row.total_requests, 1);
    assert_eq!(row.total_tokens_used, 21);
    assert_eq!(row.last_test_success, Some(true));
}

#[tokio::test]
async fn system_prompt_override_reaches_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "messages": [{ "role": "system", "content": "be brief" }]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(support::openai_reply("ok", 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store
        .add_provider(support::openai_profile("p1", &format!("{}/v1/chat", server.uri())))
        .await;

    let reply = support::orchestrator(&store)
        .generate_text(GenerateRequest {
            prompt: "hi".to_string(),
            system_prompt: Some("be brief".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(reply.text, "ok");
}

#[tokio::test]
async fn missing_prompt_is_invalid_input() {
    let store = Arc::new(MemoryStore::new());
    let err = support::orchestrator(&store)
        .generate_text(request("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::InvalidInput(_)));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn no_provider_and_no_fallback_needs_setup() {
    let store = Arc::new(MemoryStore::new());
    let err = support::orchestrator(&store)
        .generate_text(request("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::ProviderNotConfigured));
    assert_eq!(err.status_code(), 400);
    assert!(err.needs_setup());
}

#[tokio::test]
async fn no_provider_degrades_to_gateway_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer platform-key"))
        .and(body_partial_json(serde_json::json!({"model": "gateway-model"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(support::openai_reply("via gateway", 7)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let orchestrator = support::orchestrator(&store).with_gateway_fallback(GatewayFallback {
        endpoint_url: format!("{}/v1/chat/completions", server.uri()),
        api_key: "platform-key".to_string().into(),
        model: "gateway-model".to_string(),
    });

    let reply = orchestrator.generate_text(request("hello")).await.unwrap();
    assert_eq!(reply.text, "via gateway");
    assert_eq!(reply.provider, "gateway");
}

#[tokio::test]
async fn empty_api_key_is_authentication_missing() {
    let store = Arc::new(MemoryStore::new());
    let mut profile = support::openai_profile("p1", "https://unused.test");
    profile.api_key = None;
    store.add_provider(profile).await;

    let err = support::orchestrator(&store)
        .generate_text(request("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::AuthenticationMissing(_)));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn vendor_429_maps_to_rate_limited_without_echoing_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("internal quota ledger: xyz"))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store
        .add_provider(support::openai_profile("p1", &format!("{}/v1/chat", server.uri())))
        .await;

    let err = support::orchestrator(&store)
        .generate_text(request("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::RateLimited));
    assert_eq!(err.status_code(), 429);
    assert!(!err.to_string().contains("ledger"));

    // The failure is recorded on the provider row, snippet included.
    let row = store.provider("p1").await.unwrap();
    assert_eq!(row.last_test_success, Some(false));
    assert!(row.last_error.unwrap().starts_with("HTTP 429:"));
}

#[tokio::test]
async fn vendor_402_maps_to_quota_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(402))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store
        .add_provider(support::openai_profile("p1", &format!("{}/v1/chat", server.uri())))
        .await;

    let err = support::orchestrator(&store)
        .generate_text(request("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::QuotaExceeded));
    assert_eq!(err.status_code(), 402);
}

#[tokio::test]
async fn vendor_5xx_keeps_only_truncated_snippet() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("b".repeat(1000)))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store
        .add_provider(support::openai_profile("p1", &format!("{}/v1/chat", server.uri())))
        .await;

    let err = support::orchestrator(&store)
        .generate_text(request("hello"))
        .await
        .unwrap_err();
    match err {
        AiError::UpstreamError { status, snippet } => {
            assert_eq!(status, 500);
            assert_eq!(snippet.len(), 200);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_vendor_hits_the_profile_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(support::openai_reply("too late", 1))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut profile = support::openai_profile("p1", &format!("{}/v1/chat", server.uri()));
    profile.timeout_seconds = 1;
    store.add_provider(profile).await;

    let err = support::orchestrator(&store)
        .generate_text(request("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Timeout));
    assert_eq!(err.status_code(), 504);
}

#[tokio::test]
async fn google_provider_puts_key_in_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(wiremock::matchers::query_param("key", "sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "from gemini" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut profile = support::openai_profile("g1", &format!("{}/v1:generateContent", server.uri()));
    profile.api_type = atelier_ai::types::ApiType::Google;
    profile.response_path = "candidates[0].content.parts[0].text".to_string();
    store.add_provider(profile).await;

    let reply = support::orchestrator(&store)
        .generate_text(request("hello"))
        .await
        .unwrap();
    assert_eq!(reply.text, "from gemini");
    // No usage block in the Gemini reply shape above
    assert_eq!(reply.tokens, None);
}
