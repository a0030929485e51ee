//! Plain text generation.

use super::{Orchestrator, prompts};
use crate::accessor::resolve_path;
use crate::adapters::ChatParams;
use crate::error::AiError;
use crate::extract::extract_tokens;
use crate::types::{GenerateReply, GenerateRequest, ProbeOutcome};

impl Orchestrator {
    /// Generate text through the resolved provider.
    ///
    /// When no provider row matches and a gateway credential is configured,
    /// the call transparently degrades to the platform gateway instead of
    /// failing; without a credential it fails with
    /// [`AiError::ProviderNotConfigured`] so the caller can prompt setup.
    pub async fn generate_text(&self, request: GenerateRequest) -> Result<GenerateReply, AiError> {
        if request.prompt.trim().is_empty() {
            return Err(AiError::InvalidInput("prompt is required".to_string()));
        }

        let resolved = self
            .resolve_provider(request.provider_id.as_deref(), request.provider_slug.as_deref())
            .await?;

        // Fallback profiles are synthetic; their counters have no row to
        // land in, so persistence is skipped for them.
        let (profile, from_store) = match resolved {
            Some(profile) => (profile, true),
            None => match &self.gateway_fallback {
                Some(fallback) => {
                    tracing::debug!("no provider row matched, using platform gateway");
                    (fallback.clone().into_profile(), false)
                }
                None => return Err(AiError::ProviderNotConfigured),
            },
        };

        let api_key = self.effective_api_key(&profile)?;

        let system_prompt = request
            .system_prompt
            .as_deref()
            .or(profile.system_prompt.as_deref())
            .unwrap_or(prompts::GENERATE_SYSTEM_PROMPT);

        let params = ChatParams {
            model: profile.model_name.as_deref(),
            prompt: &request.prompt,
            system_prompt,
            max_tokens: request.max_tokens.unwrap_or(profile.max_tokens),
            temperature: request.temperature.unwrap_or(profile.temperature),
            images: &[],
        };

        let (data, latency_ms) = self
            .call_vendor(&profile, &api_key, &params, from_store)
            .await?;

        let text = resolve_path(&data, &profile.response_path);
        let tokens = extract_tokens(&data);

        if from_store {
            self.record_usage_best_effort(&profile.id, tokens).await;
            self.record_probe_best_effort(&profile.id, ProbeOutcome::success())
                .await;
        }

        tracing::debug!(
            provider = %profile.slug,
            latency_ms,
            tokens = ?tokens,
            "generation finished"
        );

        Ok(GenerateReply {
            text,
            provider: profile.slug,
            model: profile.model_name,
            tokens,
            latency_ms,
        })
    }
}
