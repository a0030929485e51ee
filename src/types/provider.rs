//! Provider profile types.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wire protocol family a provider speaks.
///
/// Selecting the [`crate::adapters::VendorAdapter`] is the only branching
/// point on this value; request building, auth, and multimodal encoding all
/// hang off the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiType {
    /// Platform-managed default gateway (OpenAI-compatible wire format,
    /// platform credential)
    GatewayDefault,
    /// OpenAI chat-completions compatible endpoint
    OpenAiCompatible,
    /// Anthropic messages API
    Anthropic,
    /// Google generative language API
    Google,
    /// Arbitrary HTTP/JSON endpoint, treated as OpenAI-shaped
    Custom,
}

/// A configured AI provider row.
///
/// Created and edited through admin screens outside this crate; the pipeline
/// only reads it and pushes usage counters / probe results back through
/// [`crate::store::ProviderStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub api_type: ApiType,
    pub endpoint_url: String,
    /// Stored secret; exposed only while building auth headers or the
    /// Google key-in-query URL.
    #[serde(skip_serializing, default)]
    pub api_key: Option<SecretString>,
    pub model_name: Option<String>,
    pub custom_headers: HashMap<String, String>,
    /// Accessor expression locating the reply text in the vendor response,
    /// e.g. `choices[0].message.content`. Empty means "whole body".
    pub response_path: String,
    pub system_prompt: Option<String>,
    pub timeout_seconds: u64,
    pub max_tokens: u32,
    pub temperature: f64,
    pub supports_images: bool,
    pub is_active: bool,
    pub is_default: bool,
    pub total_requests: u64,
    pub total_tokens_used: u64,
    pub last_test_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_test_success: Option<bool>,
    pub last_error: Option<String>,
}

/// Atomic usage-counter increment for a provider row.
///
/// The store contract is `SET total_requests = total_requests + requests`,
/// never a read-modify-write round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageDelta {
    pub requests: u64,
    pub tokens: u64,
}

/// Result of the most recent vendor call, recorded on the provider row.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub at: chrono::DateTime<chrono::Utc>,
    pub success: bool,
    /// Truncated failure description (`HTTP 500: <snippet>`); `None` clears
    /// the stored error on success.
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn success() -> Self {
        Self {
            at: chrono::Utc::now(),
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            at: chrono::Utc::now(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Platform-managed credential used by `generate_text` when no provider row
/// resolves. Supplied by the embedder; never read from the environment here.
#[derive(Debug, Clone)]
pub struct GatewayFallback {
    pub endpoint_url: String,
    pub api_key: SecretString,
    pub model: String,
}

impl GatewayFallback {
    /// Expand into a synthetic in-memory profile so the rest of the pipeline
    /// needs no fallback-specific branches.
    pub fn into_profile(self) -> ProviderProfile {
        ProviderProfile {
            id: "gateway-fallback".to_string(),
            name: "Platform gateway".to_string(),
            slug: "gateway".to_string(),
            api_type: ApiType::GatewayDefault,
            endpoint_url: self.endpoint_url,
            api_key: Some(self.api_key),
            model_name: Some(self.model),
            custom_headers: HashMap::new(),
            response_path: "choices[0].message.content".to_string(),
            system_prompt: None,
            timeout_seconds: 60,
            max_tokens: 4096,
            temperature: 0.7,
            supports_images: false,
            is_active: true,
            is_default: false,
            total_requests: 0,
            total_tokens_used: 0,
            last_test_at: None,
            last_test_success: None,
            last_error: None,
        }
    }
}
