//! Provider connectivity probe.

use super::Orchestrator;
use crate::adapters::{ChatParams, adapter_for};
use crate::error::AiError;
use crate::http::VendorCallRequest;
use crate::types::{ProbeOutcome, ProbeReply, ProviderProfile, TestProviderRequest};
use secrecy::SecretString;
use std::time::Duration;

/// Tiny fixed prompt; the probe checks reachability and auth, not quality.
const PROBE_PROMPT: &str = "Reply with exactly: OK";
const PROBE_MAX_TOKENS: u32 = 10;
const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

impl Orchestrator {
    /// Probe a provider with a minimal vendor call.
    ///
    /// Targets either a stored row by id or an ad-hoc, not-yet-saved
    /// configuration. Vendor-side failures are a soft result — `success:
    /// false` with the status and a truncated body snippet — so admin
    /// screens can show them inline; hard errors are reserved for caller
    /// mistakes (unknown id, incomplete ad-hoc config, missing key). For a
    /// stored row the outcome also lands in its probe fields.
    pub async fn test_provider(
        &self,
        request: TestProviderRequest,
    ) -> Result<ProbeReply, AiError> {
        let (profile, from_store) = match request.provider_id.as_deref() {
            Some(id) => {
                let profile = self
                    .providers
                    .find_active_by_id(id)
                    .await?
                    .ok_or(AiError::ProviderNotConfigured)?;
                (profile, true)
            }
            None => (ad_hoc_profile(request)?, false),
        };

        let api_key = self.effective_api_key(&profile)?;
        let adapter = adapter_for(profile.api_type);
        let params = ChatParams {
            model: profile.model_name.as_deref(),
            prompt: PROBE_PROMPT,
            system_prompt: "",
            max_tokens: PROBE_MAX_TOKENS,
            temperature: profile.temperature,
            images: &[],
        };
        let call = VendorCallRequest {
            url: adapter.request_url(&profile.endpoint_url, &api_key),
            headers: adapter.auth_headers(&api_key, &profile.custom_headers)?,
            body: adapter.build_request_body(&params),
            timeout: PROBE_TIMEOUT,
        };

        tracing::debug!(
            provider = %profile.slug,
            vendor = adapter.vendor_id(),
            from_store,
            "probing provider"
        );

        let started = std::time::Instant::now();
        let response = match self.transport.execute_json(call).await {
            Ok(response) => response,
            // No HTTP status was obtained; report only, nothing to persist.
            Err(e) => {
                return Ok(ProbeReply {
                    success: false,
                    latency_ms: None,
                    error: Some(e.to_string()),
                });
            }
        };
        let latency_ms = started.elapsed().as_millis() as u64;

        if !response.is_success() {
            let snippet: String = String::from_utf8_lossy(&response.body)
                .chars()
                .take(200)
                .collect();
            let error = format!("HTTP {}: {snippet}", response.status);
            if from_store {
                self.record_probe_best_effort(&profile.id, ProbeOutcome::failure(error.clone()))
                    .await;
            }
            return Ok(ProbeReply {
                success: false,
                latency_ms: Some(latency_ms),
                error: Some(error),
            });
        }

        if let Err(e) = response.json() {
            return Ok(ProbeReply {
                success: false,
                latency_ms: Some(latency_ms),
                error: Some(e.to_string()),
            });
        }

        if from_store {
            self.record_probe_best_effort(&profile.id, ProbeOutcome::success())
                .await;
        }

        Ok(ProbeReply {
            success: true,
            latency_ms: Some(latency_ms),
            error: None,
        })
    }
}

/// Expand ad-hoc probe fields into a synthetic profile so key resolution
/// and the adapter plumbing need no probe-specific branches.
fn ad_hoc_profile(request: TestProviderRequest) -> Result<ProviderProfile, AiError> {
    let api_type = request.api_type.ok_or_else(|| {
        AiError::InvalidInput("apiType is required to probe an unsaved provider".to_string())
    })?;
    let endpoint_url = request
        .endpoint_url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| {
            AiError::InvalidInput("endpointUrl is required to probe an unsaved provider".to_string())
        })?;

    Ok(ProviderProfile {
        id: String::new(),
        name: "unsaved provider".to_string(),
        slug: "unsaved".to_string(),
        api_type,
        endpoint_url,
        api_key: request.api_key.map(SecretString::from),
        model_name: request.model_name,
        custom_headers: request.custom_headers.unwrap_or_default(),
        response_path: String::new(),
        system_prompt: None,
        timeout_seconds: PROBE_TIMEOUT.as_secs(),
        max_tokens: PROBE_MAX_TOKENS,
        temperature: 0.7,
        supports_images: false,
        is_active: true,
        is_default: false,
        total_requests: 0,
        total_tokens_used: 0,
        last_test_at: None,
        last_test_success: None,
        last_error: None,
    })
}
