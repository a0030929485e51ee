//! Custom-endpoint adapter.
//!
//! Arbitrary HTTP/JSON endpoints are assumed OpenAI-shaped (the de facto
//! interchange format for self-hosted gateways), with two relaxations: the
//! model may be absent when the endpoint infers it server-side, and image
//! attachments are not encoded because there is no agreed multimodal shape
//! to target.

use super::{ChatParams, VendorAdapter};
use crate::error::AiError;
use crate::http::HttpHeaderBuilder;
use crate::types::ImageAttachment;
use reqwest::header::HeaderMap;
use serde_json::{Value, json};
use std::collections::HashMap;

pub struct CustomAdapter;

impl VendorAdapter for CustomAdapter {
    fn vendor_id(&self) -> &'static str {
        "custom"
    }

    fn build_request_body(&self, params: &ChatParams<'_>) -> Value {
        json!({
            "model": params.model,
            "messages": [
                { "role": "system", "content": params.system_prompt },
                { "role": "user", "content": self.encode_multimodal(params.prompt, params.images) }
            ],
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        })
    }

    fn auth_headers(
        &self,
        api_key: &str,
        custom_headers: &HashMap<String, String>,
    ) -> Result<HeaderMap, AiError> {
        Ok(HttpHeaderBuilder::new()
            .with_bearer_auth(api_key)?
            .with_custom_headers(custom_headers)?
            .build())
    }

    fn encode_multimodal(&self, text: &str, _images: &[ImageAttachment]) -> Value {
        Value::String(text.to_string())
    }
}
