//! Google generative-language adapter.
//!
//! Google's wire format has no role-separated system message and no unified
//! message content value: the system prompt is prepended to the user text,
//! and images are inlined as `inline_data` parts next to the text part
//! inside `contents[].parts`. This is why `encode_multimodal` returns plain
//! text here — the request builder places the image parts itself. The API
//! key travels in the URL query string, not a header.

use super::{ChatParams, VendorAdapter};
use crate::error::AiError;
use crate::http::HttpHeaderBuilder;
use crate::types::ImageAttachment;
use reqwest::header::HeaderMap;
use serde_json::{Value, json};
use std::collections::HashMap;

pub struct GoogleAdapter;

impl VendorAdapter for GoogleAdapter {
    fn vendor_id(&self) -> &'static str {
        "google"
    }

    fn build_request_body(&self, params: &ChatParams<'_>) -> Value {
        let mut parts = vec![json!({
            "text": format!("{}\n\n{}", params.system_prompt, params.prompt)
        })];
        for img in params.images {
            parts.push(json!({
                "inline_data": {
                    "mime_type": img.mime_type,
                    "data": img.base64
                }
            }));
        }
        json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "maxOutputTokens": params.max_tokens,
                "temperature": params.temperature,
            }
        })
    }

    fn auth_headers(
        &self,
        _api_key: &str,
        custom_headers: &HashMap<String, String>,
    ) -> Result<HeaderMap, AiError> {
        // No auth header; the key rides in the query string.
        Ok(HttpHeaderBuilder::new()
            .with_custom_headers(custom_headers)?
            .build())
    }

    fn encode_multimodal(&self, text: &str, _images: &[ImageAttachment]) -> Value {
        Value::String(text.to_string())
    }

    fn request_url(&self, endpoint: &str, api_key: &str) -> String {
        format!("{endpoint}?key={}", urlencoding::encode(api_key))
    }
}
