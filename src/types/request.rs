//! Request and reply types for the orchestrator operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Caller-supplied image, already base64-encoded. This crate never decodes
/// or transforms the payload; it only wraps it in the vendor's wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub base64: String,
}

/// Inputs for [`crate::Orchestrator::generate_text`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    pub provider_id: Option<String>,
    pub provider_slug: Option<String>,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

/// Successful text generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReply {
    pub text: String,
    /// Provider slug the call actually went through
    pub provider: String,
    pub model: Option<String>,
    pub tokens: Option<u64>,
    pub latency_ms: u64,
}

/// Inputs for [`crate::Orchestrator::test_provider`].
///
/// Either a stored row (`provider_id`, remaining fields ignored) or an
/// ad-hoc configuration for a provider that has not been saved yet, so
/// admin screens can verify credentials before committing a row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestProviderRequest {
    pub provider_id: Option<String>,
    pub api_type: Option<super::ApiType>,
    pub endpoint_url: Option<String>,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub custom_headers: Option<HashMap<String, String>>,
}

/// Outcome of a connectivity probe. Vendor-side failures land here with
/// `success: false` rather than as errors; only caller mistakes (unknown
/// id, missing key) fail [`crate::Orchestrator::test_provider`] itself.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReply {
    pub success: bool,
    /// `None` when the call died before any HTTP status came back
    pub latency_ms: Option<u64>,
    pub error: Option<String>,
}

/// Which synthesis flow to run.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SynthesisMode {
    /// Rewrite an existing generator's config in place
    Edit {
        #[serde(rename = "generatorId")]
        generator_id: String,
    },
    /// Create a new generator from a caller-supplied skeleton
    Create {
        #[serde(rename = "generatorName")]
        name: String,
        #[serde(rename = "generatorSlug")]
        slug: String,
        #[serde(rename = "generatorType")]
        generator_type: String,
        #[serde(rename = "baseConfig", default)]
        base_config: Option<Value>,
    },
}

/// Inputs for [`crate::Orchestrator::synthesize`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeRequest {
    #[serde(flatten)]
    pub mode: SynthesisMode,
    pub user_prompt: String,
    pub provider_id: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageAttachment>,
}

/// Outcome of a synthesis attempt.
///
/// `Rejected` is the soft-failure arm (HTTP-200-class): the pipeline ran,
/// but the model's output was unusable. The raw text rides along so a human
/// can inspect it and retry.
#[derive(Debug, Clone)]
pub enum SynthesizeReply {
    Applied {
        generator_id: String,
        new_config: Value,
        raw_text: String,
        tokens_used: Option<u64>,
        processing_time_ms: u64,
    },
    Rejected {
        error: String,
        raw_text: String,
    },
}

impl SynthesizeReply {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Wire shape for the embedding route layer: `success` is a real
    /// boolean, raw model text travels as `message`.
    pub fn to_response_json(&self) -> Value {
        match self {
            Self::Applied {
                generator_id,
                new_config,
                raw_text,
                tokens_used,
                processing_time_ms,
            } => serde_json::json!({
                "success": true,
                "generatorId": generator_id,
                "newConfig": new_config,
                "message": raw_text,
                "tokensUsed": tokens_used,
                "processingTime": processing_time_ms,
            }),
            Self::Rejected { error, raw_text } => serde_json::json!({
                "success": false,
                "error": error,
                "message": raw_text,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn synthesize_request_parses_edit_wire_shape() {
        let req: SynthesizeRequest = serde_json::from_value(json!({
            "mode": "edit",
            "generatorId": "g-1",
            "userPrompt": "make it blue",
            "providerId": "p-1",
        }))
        .unwrap();
        assert!(matches!(req.mode, SynthesisMode::Edit { ref generator_id } if generator_id == "g-1"));
        assert_eq!(req.user_prompt, "make it blue");
        assert!(req.images.is_empty());
    }

    #[test]
    fn synthesize_request_parses_create_wire_shape() {
        let req: SynthesizeRequest = serde_json::from_value(json!({
            "mode": "create",
            "generatorName": "Poster",
            "generatorSlug": "poster",
            "generatorType": "poster",
            "baseConfig": {"dimensions": {"width": 800, "height": 600}},
            "userPrompt": "seasonal theme",
        }))
        .unwrap();
        match req.mode {
            SynthesisMode::Create { name, slug, generator_type, base_config } => {
                assert_eq!(name, "Poster");
                assert_eq!(slug, "poster");
                assert_eq!(generator_type, "poster");
                assert_eq!(base_config.unwrap()["dimensions"]["width"], 800);
            }
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[test]
    fn test_provider_request_parses_ad_hoc_wire_shape() {
        let req: TestProviderRequest = serde_json::from_value(json!({
            "apiType": "anthropic",
            "endpointUrl": "https://api.anthropic.com/v1/messages",
            "apiKey": "sk-ant",
            "modelName": "claude-sonnet-4-20250514",
            "customHeaders": {"x-team": "design"},
        }))
        .unwrap();
        assert!(req.provider_id.is_none());
        assert!(matches!(req.api_type, Some(crate::types::ApiType::Anthropic)));
        assert_eq!(req.custom_headers.unwrap()["x-team"], "design");
    }

    #[test]
    fn applied_reply_serializes_success_boolean() {
        let reply = SynthesizeReply::Applied {
            generator_id: "g".into(),
            new_config: json!({}),
            raw_text: "{}".into(),
            tokens_used: Some(5),
            processing_time_ms: 12,
        };
        let wire = reply.to_response_json();
        assert_eq!(wire["success"], json!(true));
        assert_eq!(wire["generatorId"], "g");
        assert_eq!(wire["processingTime"], 12);
    }

    #[test]
    fn rejected_reply_carries_raw_text_as_message() {
        let reply = SynthesizeReply::Rejected {
            error: "no json".into(),
            raw_text: "some prose".into(),
        };
        let wire = reply.to_response_json();
        assert_eq!(wire["success"], json!(false));
        assert_eq!(wire["message"], "some prose");
    }
}
