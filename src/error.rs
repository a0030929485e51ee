//! Error types for atelier-ai.
//!
//! One taxonomy covers both orchestrator operations. Content-quality
//! problems (the model returned prose instead of JSON, or a config that
//! fails validation) are deliberately *not* errors here — they surface as
//! the rejected arm of `SynthesizeReply`, because a human should inspect
//! the raw text and retry.

use thiserror::Error;

/// Errors that can occur in the AI request pipeline.
#[derive(Error, Debug)]
pub enum AiError {
    /// Bad caller input (missing prompt, missing ids, duplicate slug)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No provider matched the requested id/slug/default
    #[error("No AI provider configured")]
    ProviderNotConfigured,

    /// Resolved provider has no usable API key
    #[error("API key not configured for provider '{0}'")]
    AuthenticationMissing(String),

    /// Edit-mode synthesis targeted a generator that does not exist
    #[error("Generator not found: {0}")]
    GeneratorNotFound(String),

    /// Vendor returned HTTP 429
    #[error("Rate limit exceeded, try again in a few seconds")]
    RateLimited,

    /// Vendor returned HTTP 402
    #[error("Insufficient credits for this provider")]
    QuotaExceeded,

    /// Vendor returned any other non-2xx status. Only a truncated snippet
    /// of the vendor body is retained; the full body goes to the logs.
    #[error("Upstream AI API error (HTTP {status})")]
    UpstreamError { status: u16, snippet: String },

    /// The per-provider deadline elapsed before the vendor answered
    #[error("AI request timed out")]
    Timeout,

    /// Transport-level failure before any HTTP status was obtained
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Invalid header names/values or other profile misconfiguration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The relational store failed during a primary mutation
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// Internal serialization fault
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl AiError {
    /// HTTP status the embedding route layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_)
            | Self::ProviderNotConfigured
            | Self::AuthenticationMissing(_) => 400,
            Self::GeneratorNotFound(_) => 404,
            Self::RateLimited => 429,
            Self::QuotaExceeded => 402,
            Self::Timeout => 504,
            Self::UpstreamError { .. }
            | Self::HttpError(_)
            | Self::ConfigurationError(_)
            | Self::PersistenceError(_)
            | Self::ParseError(_) => 500,
        }
    }

    /// Whether the caller should be prompted to configure a provider.
    pub fn needs_setup(&self) -> bool {
        matches!(self, Self::ProviderNotConfigured)
    }
}

/// Result type for atelier-ai operations
pub type Result<T> = std::result::Result<T, AiError>;
