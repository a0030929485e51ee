//! OpenAI-compatible adapter, also used for the platform gateway.

use super::{ChatParams, VendorAdapter};
use crate::error::AiError;
use crate::http::HttpHeaderBuilder;
use crate::types::ImageAttachment;
use reqwest::header::HeaderMap;
use serde_json::{Value, json};
use std::collections::HashMap;

pub struct OpenAiCompatibleAdapter;

impl VendorAdapter for OpenAiCompatibleAdapter {
    fn vendor_id(&self) -> &'static str {
        "openai-compatible"
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

    fn encode_multimodal(&self, text: &str, images: &[ImageAttachment]) -> Value {
        if images.is_empty() {
            return Value::String(text.to_string());
        }
        let mut parts = vec![json!({ "type": "text", "text": text })];
        for img in images {
            parts.push(json!({
                "type": "image_url",
                "image_url": {
                    "url": format!("data:{};base64,{}", img.mime_type, img.base64)
                }
            }));
        }
        Value::Array(parts)
    }
}
