//! Anthropic messages-API adapter.
//!
//! Two wire quirks matter here: the system prompt is a top-level `system`
//! field (never a message in `messages`), and image parts use base64
//! `source` objects instead of data URLs.

use super::{ChatParams, VendorAdapter};
use crate::error::AiError;
use crate::http::HttpHeaderBuilder;
use crate::types::ImageAttachment;
use reqwest::header::HeaderMap;
use serde_json::{Value, json};
use std::collections::HashMap;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicAdapter;

impl VendorAdapter for AnthropicAdapter {
    fn vendor_id(&self) -> &'static str {
        "anthropic"
    }

    fn build_request_body(&self, params: &ChatParams<'_>) -> Value {
        json!({
            "model": params.model,
            "max_tokens": params.max_tokens,
            "system": params.system_prompt,
            "messages": [
                { "role": "user", "content": self.encode_multimodal(params.prompt, params.images) }
            ],
        })
    }

    fn auth_headers(
        &self,
        api_key: &str,
        custom_headers: &HashMap<String, String>,
    ) -> Result<HeaderMap, AiError> {
        Ok(HttpHeaderBuilder::new()
            .with_header("x-api-key", api_key)?
            .with_header("anthropic-version", ANTHROPIC_VERSION)?
            .with_custom_headers(custom_headers)?
            .build())
    }

    fn encode_multimodal(&self, text: &str, images: &[ImageAttachment]) -> Value {
        if images.is_empty() {
            return Value::String(text.to_string());
        }
        let mut parts = vec![json!({ "type": "text", "text": text })];
        for img in images {
            parts.push(json!({
                "type": "image",
                "source": {
                    "type": "base64",
                    "media_type": img.mime_type,
                    "data": img.base64
                }
            }));
        }
        Value::Array(parts)
    }
}
