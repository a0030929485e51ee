//! Orchestrator: composes resolver, adapters, transport, extraction, and
//! persistence into the public operations.
//!
//! [`Orchestrator::generate_text`] is plain prompt-in/text-out with a
//! degrade-gracefully path through the platform gateway.
//! [`Orchestrator::synthesize`] turns a model reply into a validated
//! generator config with an audit trail; it never falls back to the
//! gateway, because synthesis against an unknown model is worse than a
//! setup error. [`Orchestrator::test_provider`] is a minimal connectivity
//! probe for admin screens.
//!
//! Persistence rules: the generator insert/update is the primary mutation
//! and fails hard; usage counters, probe fields, and the history append are
//! best-effort and never turn a successful call into a failure.

mod generate;
mod probe;
mod prompts;
mod synthesize;

use crate::adapters::{ChatParams, adapter_for};
use crate::error::AiError;
use crate::http::{HttpTransport, VendorCallRequest, classify_vendor_status};
use crate::store::{GeneratorStore, HistoryStore, ProviderStore};
use crate::types::{GatewayFallback, ProbeOutcome, ProviderProfile};
use secrecy::ExposeSecret;
use std::sync::Arc;
use std::time::Duration;

/// The AI pipeline entry point.
pub struct Orchestrator {
    providers: Arc<dyn ProviderStore>,
    generators: Arc<dyn GeneratorStore>,
    history: Arc<dyn HistoryStore>,
    transport: Arc<dyn HttpTransport>,
    gateway_fallback: Option<GatewayFallback>,
}

impl Orchestrator {
    pub fn new(
        providers: Arc<dyn ProviderStore>,
        generators: Arc<dyn GeneratorStore>,
        history: Arc<dyn HistoryStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            providers,
            generators,
            history,
            transport,
            gateway_fallback: None,
        }
    }

    /// Attach the platform-managed gateway credential. Used by
    /// `generate_text` when no provider row resolves, and as the effective
    /// key for gateway-default profiles.
    pub fn with_gateway_fallback(mut self, fallback: GatewayFallback) -> Self {
        self.gateway_fallback = Some(fallback);
        self
    }

    /// Resolve a provider by explicit id, else explicit slug, else the
    /// active default. `Ok(None)` means nothing matched; the caller decides
    /// whether that is an error or a fallback.
    pub(crate) async fn resolve_provider(
        &self,
        id: Option<&str>,
        slug: Option<&str>,
    ) -> Result<Option<ProviderProfile>, AiError> {
        if let Some(id) = id {
            return self.providers.find_active_by_id(id).await;
        }
        if let Some(slug) = slug {
            return self.providers.find_active_by_slug(slug).await;
        }
        self.providers.find_active_default().await
    }

    /// Effective API key for a profile: the platform credential for
    /// gateway-default profiles, the stored key otherwise.
    pub(crate) fn effective_api_key(&self, profile: &ProviderProfile) -> Result<String, AiError> {
        // Gateway-default profiles always use the platform credential; a
        // stored key on such a profile is ignored.
        let key = match profile.api_type {
            crate::types::ApiType::GatewayDefault => self
                .gateway_fallback
                .as_ref()
                .map(|f| f.api_key.expose_secret().to_string())
                .unwrap_or_default(),
            _ => profile
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().to_string())
                .unwrap_or_default(),
        };
        if key.is_empty() {
            return Err(AiError::AuthenticationMissing(profile.name.clone()));
        }
        Ok(key)
    }

    /// Build and execute the vendor call, returning the parsed response
    /// body and the call latency. Non-2xx statuses are classified into the
    /// error taxonomy and recorded as a failed probe on the provider row.
    pub(crate) async fn call_vendor(
        &self,
        profile: &ProviderProfile,
        api_key: &str,
        params: &ChatParams<'_>,
        persist_probe: bool,
    ) -> Result<(serde_json::Value, u64), AiError> {
        let adapter = adapter_for(profile.api_type);
        let request = VendorCallRequest {
            url: adapter.request_url(&profile.endpoint_url, api_key),
            headers: adapter.auth_headers(api_key, &profile.custom_headers)?,
            body: adapter.build_request_body(params),
            timeout: Duration::from_secs(profile.timeout_seconds),
        };

        tracing::debug!(
            provider = %profile.slug,
            vendor = adapter.vendor_id(),
            model = ?params.model,
            "dispatching vendor request"
        );

        let started = std::time::Instant::now();
        let response = self.transport.execute_json(request).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        if !response.is_success() {
            if persist_probe {
                let snippet: String = String::from_utf8_lossy(&response.body)
                    .chars()
                    .take(200)
                    .collect();
                let probe =
                    ProbeOutcome::failure(format!("HTTP {}: {snippet}", response.status));
                self.record_probe_best_effort(&profile.id, probe).await;
            }
            return Err(classify_vendor_status(response.status, &response.body));
        }

        Ok((response.json()?, latency_ms))
    }

    pub(crate) async fn record_probe_best_effort(&self, provider_id: &str, probe: ProbeOutcome) {
        if let Err(e) = self.providers.record_probe(provider_id, probe).await {
            tracing::warn!(provider_id, error = %e, "failed to record provider probe");
        }
    }

    pub(crate) async fn record_usage_best_effort(
        &self,
        provider_id: &str,
        tokens: Option<u64>,
    ) {
        let delta = crate::types::UsageDelta {
            requests: 1,
            tokens: tokens.unwrap_or(0),
        };
        if let Err(e) = self.providers.record_usage(provider_id, delta).await {
            tracing::warn!(provider_id, error = %e, "failed to record provider usage");
        }
    }
}
