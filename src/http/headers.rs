//! HTTP header construction for vendor requests.
//!
//! Header names and values come from stored provider profiles, so every
//! insertion is fallible: a bad custom header surfaces as a
//! `ConfigurationError` instead of a panic deep inside reqwest.

use crate::error::AiError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// HTTP header builder for vendor API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new builder pre-loaded with the JSON content type
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self { headers }
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, AiError> {
        let auth_value = format!("Bearer {token}");
        self.headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| AiError::ConfigurationError(format!("Invalid API key format: {e}")))?,
        );
        Ok(self)
    }

    /// Add a named header (e.g. `x-api-key` for Anthropic)
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, AiError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            AiError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
        })?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value)
                .map_err(|e| AiError::ConfigurationError(format!("Invalid header value: {e}")))?,
        );
        Ok(self)
    }

    /// Merge the profile's custom headers last, overriding anything set so
    /// far with the same name.
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, AiError> {
        for (key, value) in custom_headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                AiError::ConfigurationError(format!("Invalid header name '{key}': {e}"))
            })?;
            self.headers.insert(
                header_name,
                HeaderValue::from_str(value).map_err(|e| {
                    AiError::ConfigurationError(format!("Invalid header value for '{key}': {e}"))
                })?,
            );
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
