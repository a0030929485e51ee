//! Vendor HTTP transport.
//!
//! The transport is an injectable seam: the orchestrator only sees
//! `execute_json`, so tests (and embedders with exotic networking needs) can
//! substitute a synthetic transport without touching reqwest. The production
//! implementation performs a single bounded-timeout JSON POST — no retries,
//! no backoff; a failed vendor call is reported, not retried.

use crate::error::AiError;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Longest vendor error snippet retained on errors and probe records. The
/// full body is logged server-side only.
const ERROR_SNIPPET_LEN: usize = 200;

/// Transport-level request data for a vendor JSON POST.
#[derive(Debug, Clone)]
pub struct VendorCallRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
    pub timeout: Duration,
}

/// Transport-level response data. Status classification happens above the
/// transport so synthetic transports stay trivial.
#[derive(Debug, Clone)]
pub struct VendorCallResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl VendorCallResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON, for successful responses.
    pub fn json(&self) -> Result<serde_json::Value, AiError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| AiError::ParseError(format!("Vendor response is not JSON: {e}")))
    }
}

/// Injectable HTTP transport for vendor JSON requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute_json(&self, request: VendorCallRequest)
    -> Result<VendorCallResponse, AiError>;
}

/// Production transport backed by a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute_json(
        &self,
        request: VendorCallRequest,
    ) -> Result<VendorCallResponse, AiError> {
        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .json(&request.body)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::HttpError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::HttpError(format!("Failed to read vendor response body: {e}"))
                }
            })?
            .to_vec();

        Ok(VendorCallResponse { status, body })
    }
}

/// Classify a non-2xx vendor status into the error taxonomy.
///
/// The vendor body is logged in full here and truncated everywhere else, so
/// upstream internals never reach the end caller verbatim.
pub fn classify_vendor_status(status: u16, body: &[u8]) -> AiError {
    let body_text = String::from_utf8_lossy(body);
    tracing::error!(status, body = %body_text, "vendor API returned an error");

    match status {
        429 => AiError::RateLimited,
        402 => AiError::QuotaExceeded,
        _ => AiError::UpstreamError {
            status,
            snippet: truncate_snippet(&body_text),
        },
    }
}

fn truncate_snippet(text: &str) -> String {
    let mut end = ERROR_SNIPPET_LEN.min(text.len());
    while end < text.len() && !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
