//! Vendor adapters.
//!
//! One strategy object per [`ApiType`] owns everything vendor-specific:
//! request body shape, auth headers, multimodal content encoding, and URL
//! construction. The rest of the pipeline branches on the vendor exactly
//! once, in [`adapter_for`].

mod anthropic;
mod custom;
mod google;
mod openai;

pub use anthropic::AnthropicAdapter;
pub use custom::CustomAdapter;
pub use google::GoogleAdapter;
pub use openai::OpenAiCompatibleAdapter;

use crate::error::AiError;
use crate::types::{ApiType, ImageAttachment};
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::HashMap;

/// Effective chat parameters after the orchestrator has applied overrides
/// and image gating. `model` is absent only for custom endpoints that infer
/// the model server-side.
#[derive(Debug, Clone)]
pub struct ChatParams<'a> {
    pub model: Option<&'a str>,
    pub prompt: &'a str,
    pub system_prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f64,
    pub images: &'a [ImageAttachment],
}

/// Per-vendor request construction strategy.
pub trait VendorAdapter: Send + Sync {
    /// Stable identifier, used in logs
    fn vendor_id(&self) -> &'static str;

    /// Build the vendor-specific JSON request body.
    fn build_request_body(&self, params: &ChatParams<'_>) -> Value;

    /// Auth headers for this vendor. The profile's custom headers merge
    /// last and may override anything, including the auth header itself.
    fn auth_headers(
        &self,
        api_key: &str,
        custom_headers: &HashMap<String, String>,
    ) -> Result<HeaderMap, AiError>;

    /// Encode text plus images into the vendor's message-content shape.
    /// Plain text when there are no images. Google returns plain text even
    /// with images: its wire format inlines `inline_data` parts as siblings
    /// of the text part, which [`build_request_body`] handles directly.
    fn encode_multimodal(&self, text: &str, images: &[ImageAttachment]) -> Value;

    /// Final request URL. Google appends the API key as a query parameter;
    /// everyone else uses the endpoint unchanged.
    fn request_url(&self, endpoint: &str, _api_key: &str) -> String {
        endpoint.to_string()
    }
}

/// Select the adapter for a provider's API type.
pub fn adapter_for(api_type: ApiType) -> &'static dyn VendorAdapter {
    static OPENAI: OpenAiCompatibleAdapter = OpenAiCompatibleAdapter;
    static ANTHROPIC: AnthropicAdapter = AnthropicAdapter;
    static GOOGLE: GoogleAdapter = GoogleAdapter;
    static CUSTOM: CustomAdapter = CustomAdapter;

    match api_type {
        ApiType::GatewayDefault | ApiType::OpenAiCompatible => &OPENAI,
        ApiType::Anthropic => &ANTHROPIC,
        ApiType::Google => &GOOGLE,
        ApiType::Custom => &CUSTOM,
    }
}
