//! End-to-end tests for the provider connectivity probe.

mod support;

use atelier_ai::AiError;
use atelier_ai::store::MemoryStore;
use atelier_ai::types::{ApiType, TestProviderRequest};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn by_id(id: &str) -> TestProviderRequest {
    TestProviderRequest {
        provider_id: Some(id.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn probe_of_stored_provider_records_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "max_tokens": 10,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::openai_reply("OK", 2)))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store
        .add_provider(support::openai_profile("p1", &format!("{}/v1/chat", server.uri())))
        .await;

    let reply = support::orchestrator(&store)
        .test_provider(by_id("p1"))
        .await
        .unwrap();

    assert!(reply.success);
    assert!(reply.latency_ms.is_some());
    assert!(reply.error.is_none());

    let row = store.provider("p1").await.unwrap();
    assert_eq!(row.last_test_success, Some(true));
    assert!(row.last_test_at.is_some());
    assert!(row.last_error.is_none());
    // a probe is not a billable generation
    assert_eq!(row.total_requests, 0);
    assert_eq!(row.total_tokens_used, 0);
}

#[tokio::test]
async fn vendor_failure_is_a_soft_result_and_persists_the_probe() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store
        .add_provider(support::openai_profile("p1", &format!("{}/v1/chat", server.uri())))
        .await;

    let reply = support::orchestrator(&store)
        .test_provider(by_id("p1"))
        .await
        .unwrap();

    assert!(!reply.success);
    assert!(reply.latency_ms.is_some());
    assert_eq!(reply.error.as_deref(), Some("HTTP 401: bad key"));

    let row = store.provider("p1").await.unwrap();
    assert_eq!(row.last_test_success, Some(false));
    assert_eq!(row.last_error.as_deref(), Some("HTTP 401: bad key"));
}

#[tokio::test]
async fn ad_hoc_probe_touches_no_rows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .and(header("authorization", "Bearer sk-unsaved"))
        .and(body_partial_json(serde_json::json!({ "max_tokens": 10 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::openai_reply("OK", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reply = support::orchestrator(&store)
        .test_provider(TestProviderRequest {
            api_type: Some(ApiType::OpenAiCompatible),
            endpoint_url: Some(format!("{}/v1/chat", server.uri())),
            api_key: Some("sk-unsaved".to_string()),
            model_name: Some("test-model".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(reply.success);
}

#[tokio::test]
async fn unknown_provider_id_is_a_hard_error() {
    let store = Arc::new(MemoryStore::new());
    let err = support::orchestrator(&store)
        .test_provider(by_id("nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::ProviderNotConfigured));
}

#[tokio::test]
async fn ad_hoc_probe_requires_endpoint_and_api_type() {
    let store = Arc::new(MemoryStore::new());
    let orch = support::orchestrator(&store);

    let err = orch
        .test_provider(TestProviderRequest {
            endpoint_url: Some("https://api.example/v1/chat".to_string()),
            api_key: Some("k".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::InvalidInput(_)));

    let err = orch
        .test_provider(TestProviderRequest {
            api_type: Some(ApiType::OpenAiCompatible),
            api_key: Some("k".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::InvalidInput(_)));
}

#[tokio::test]
async fn ad_hoc_probe_without_key_is_a_hard_error() {
    let store = Arc::new(MemoryStore::new());
    let err = support::orchestrator(&store)
        .test_provider(TestProviderRequest {
            api_type: Some(ApiType::OpenAiCompatible),
            endpoint_url: Some("https://api.example/v1/chat".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::AuthenticationMissing(_)));
}

#[tokio::test]
async fn non_json_success_body_is_a_soft_failure_without_probe_update() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store
        .add_provider(support::openai_profile("p1", &format!("{}/v1/chat", server.uri())))
        .await;

    let reply = support::orchestrator(&store)
        .test_provider(by_id("p1"))
        .await
        .unwrap();

    assert!(!reply.success);
    assert!(reply.error.is_some());
    let row = store.provider("p1").await.unwrap();
    assert!(row.last_test_success.is_none());
}
