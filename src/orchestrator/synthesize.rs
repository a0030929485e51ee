//! Generator-config synthesis (edit and create modes).

use super::{Orchestrator, prompts};
use crate::accessor::resolve_path;
use crate::adapters::ChatParams;
use crate::error::AiError;
use crate::extract::{extract_json, extract_tokens};
use crate::types::{
    AttachmentMeta, ImageAttachment, NewEditHistory, NewGenerator, ProbeOutcome,
    SynthesisMode, SynthesizeReply, SynthesizeRequest,
};
use crate::validate::validate_generator_config;
use serde_json::Value;

impl Orchestrator {
    /// Synthesize a generator config from a model reply.
    ///
    /// Edit mode rewrites an existing row's config; create mode inserts a
    /// new row, but only after the synthesized config passes structural
    /// validation. Unusable model output is a soft failure
    /// ([`SynthesizeReply::Rejected`]), not an error: the raw text goes
    /// back to the caller for a human to inspect and retry. Requires an
    /// explicitly resolvable provider — no gateway fallback here.
    pub async fn synthesize(&self, request: SynthesizeRequest) -> Result<SynthesizeReply, AiError> {
        if request.user_prompt.trim().is_empty() {
            return Err(AiError::InvalidInput("userPrompt is required".to_string()));
        }

        // Baseline config the negotiation starts from.
        let (baseline, generator_name) = match &request.mode {
            SynthesisMode::Edit { generator_id } => {
                let row = self
                    .generators
                    .find_by_id(generator_id)
                    .await?
                    .ok_or_else(|| AiError::GeneratorNotFound(generator_id.clone()))?;
                (row.config.clone(), row.name)
            }
            SynthesisMode::Create {
                name,
                slug,
                generator_type,
                base_config,
            } => {
                if name.is_empty() || slug.is_empty() || generator_type.is_empty() {
                    return Err(AiError::InvalidInput(
                        "name, slug and type are required for creation".to_string(),
                    ));
                }
                if self.generators.slug_exists(slug).await? {
                    return Err(AiError::InvalidInput(format!(
                        "slug '{slug}' already exists, pick another name"
                    )));
                }
                (
                    base_config
                        .clone()
                        .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
                    name.clone(),
                )
            }
        };

        let profile = self
            .resolve_provider(request.provider_id.as_deref(), None)
            .await?
            .ok_or(AiError::ProviderNotConfigured)?;

        let api_key = self.effective_api_key(&profile)?;

        // Image gating: unsupported attachments are dropped, not an error.
        let images: &[ImageAttachment] = if profile.supports_images {
            &request.images
        } else {
            if !request.images.is_empty() {
                tracing::warn!(
                    provider = %profile.name,
                    count = request.images.len(),
                    "provider does not support images, attachments ignored"
                );
            }
            &[]
        };

        let (system_prompt, full_prompt) = match &request.mode {
            SynthesisMode::Create {
                name,
                generator_type,
                ..
            } => (
                prompts::CREATE_SYSTEM_PROMPT.to_string(),
                prompts::build_create_prompt(
                    name,
                    generator_type,
                    &baseline,
                    &request.user_prompt,
                    images.len(),
                ),
            ),
            SynthesisMode::Edit { .. } => (
                profile
                    .system_prompt
                    .clone()
                    .unwrap_or_else(|| prompts::EDIT_SYSTEM_PROMPT.to_string()),
                prompts::build_edit_prompt(
                    &generator_name,
                    &baseline,
                    &request.user_prompt,
                    images.len(),
                ),
            ),
        };

        let params = ChatParams {
            model: profile.model_name.as_deref(),
            prompt: &full_prompt,
            system_prompt: &system_prompt,
            max_tokens: profile.max_tokens,
            temperature: profile.temperature,
            images,
        };

        let (data, processing_time_ms) = self
            .call_vendor(&profile, &api_key, &params, true)
            .await?;

        let raw_text = resolve_path(&data, &profile.response_path);
        let tokens_used = extract_tokens(&data);

        let Some(new_config) = extract_json(&raw_text) else {
            tracing::debug!(provider = %profile.slug, "model reply held no usable JSON");
            return Ok(SynthesizeReply::Rejected {
                error: "The model did not return usable JSON".to_string(),
                raw_text,
            });
        };

        if matches!(request.mode, SynthesisMode::Create { .. })
            && !validate_generator_config(&new_config)
        {
            tracing::debug!(provider = %profile.slug, "synthesized config failed validation");
            return Ok(SynthesizeReply::Rejected {
                error: "The generated configuration is invalid. Retry with more specific instructions."
                    .to_string(),
                raw_text,
            });
        }

        // Primary mutation; failures here are hard errors.
        let (generator_id, stored_prompt) = match &request.mode {
            SynthesisMode::Create {
                name,
                slug,
                generator_type,
                ..
            } => {
                let description = new_config
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("AI-created {generator_type} generator"));
                let id = self
                    .generators
                    .insert(NewGenerator {
                        name: name.clone(),
                        slug: slug.clone(),
                        generator_type: generator_type.clone(),
                        description,
                        status: "ready".to_string(),
                        config: new_config.clone(),
                        installed_via: "ai-created".to_string(),
                        installed_at: chrono::Utc::now(),
                    })
                    .await?;
                (id, format!("[create] {}", request.user_prompt))
            }
            SynthesisMode::Edit { generator_id } => {
                self.generators
                    .update_config(generator_id, new_config.clone())
                    .await?;
                (generator_id.clone(), request.user_prompt.clone())
            }
        };

        // Audit trail and counters are best-effort: their failure never
        // rolls back the mutation above.
        let history = NewEditHistory {
            generator_id: generator_id.clone(),
            provider_id: profile.id.clone(),
            old_config: baseline,
            new_config: new_config.clone(),
            user_prompt: stored_prompt,
            ai_response: raw_text.clone(),
            tokens_used,
            processing_time_ms,
            success: true,
            attachments: request
                .images
                .iter()
                .map(|img| AttachmentMeta {
                    name: img.name.clone(),
                    mime_type: img.mime_type.clone(),
                })
                .collect(),
        };
        if let Err(e) = self.history.append(history).await {
            tracing::warn!(generator_id, error = %e, "failed to append edit history");
        }
        self.record_usage_best_effort(&profile.id, tokens_used).await;
        self.record_probe_best_effort(&profile.id, ProbeOutcome::success())
            .await;

        Ok(SynthesizeReply::Applied {
            generator_id,
            new_config,
            raw_text,
            tokens_used,
            processing_time_ms,
        })
    }
}
