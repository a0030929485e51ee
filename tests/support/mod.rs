//! Shared fixtures for the orchestrator flow tests.
#![allow(dead_code)]

use atelier_ai::Orchestrator;
use atelier_ai::http::ReqwestTransport;
use atelier_ai::store::MemoryStore;
use atelier_ai::types::{ApiType, GeneratorRecord, ProviderProfile};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// An active OpenAI-compatible provider pointing at a test server.
pub fn openai_profile(id: &str, endpoint: &str) -> ProviderProfile {
    ProviderProfile {
        id: id.to_string(),
        name: format!("{id} provider"),
        slug: id.to_string(),
        api_type: ApiType::OpenAiCompatible,
        endpoint_url: endpoint.to_string(),
        api_key: Some("sk-test".to_string().into()),
        model_name: Some("test-model".to_string()),
        custom_headers: HashMap::new(),
        response_path: "choices[0].message.content".to_string(),
        system_prompt: None,
        timeout_seconds: 30,
        max_tokens: 1024,
        temperature: 0.7,
        supports_images: false,
        is_active: true,
        is_default: true,
        total_requests: 0,
        total_tokens_used: 0,
        last_test_at: None,
        last_test_success: None,
        last_error: None,
    }
}

pub fn anthropic_profile(id: &str, endpoint: &str) -> ProviderProfile {
    ProviderProfile {
        api_type: ApiType::Anthropic,
        response_path: "content[0].text".to_string(),
        supports_images: true,
        ..openai_profile(id, endpoint)
    }
}

pub fn generator(id: &str, slug: &str, config: Value) -> GeneratorRecord {
    GeneratorRecord {
        id: id.to_string(),
        name: format!("{slug} generator"),
        slug: slug.to_string(),
        generator_type: "poster".to_string(),
        status: "ready".to_string(),
        config,
    }
}

pub fn orchestrator(store: &Arc<MemoryStore>) -> Orchestrator {
    Orchestrator::new(
        Arc::clone(store) as _,
        Arc::clone(store) as _,
        Arc::clone(store) as _,
        Arc::new(ReqwestTransport::new()),
    )
}

/// A chat-completions style vendor reply whose message content is `content`.
pub fn openai_reply(content: &str, total_tokens: u64) -> Value {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }],
        "usage": { "total_tokens": total_tokens }
    })
}
