//! Generative-language provider abstraction.
//!
//! The assistant talks to a [`TextProvider`] trait object so the Gemini
//! client can be swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Reply text; `None` when the model returned no text parts.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

impl FinishReason {
    pub(crate) fn from_api(reason: Option<&str>) -> Self {
        match reason {
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") => {
                FinishReason::ContentFilter
            }
            _ => FinishReason::Complete,
        }
    }
}

/// Generation parameters for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationParams {
    /// Ask the model for an `application/json` reply.
    pub json_output: bool,
}

impl GenerationParams {
    pub fn json() -> Self {
        Self { json_output: true }
    }
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text reply for a fully assembled prompt.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Cheap readiness check. Must not call the upstream API.
    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Model identifier, for logs and the health endpoint.
    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(FinishReason::from_api(Some("STOP")), FinishReason::Complete);
        assert_eq!(FinishReason::from_api(None), FinishReason::Complete);
        assert_eq!(
            FinishReason::from_api(Some("MAX_TOKENS")),
            FinishReason::Length
        );
        assert_eq!(
            FinishReason::from_api(Some("SAFETY")),
            FinishReason::ContentFilter
        );
    }

    #[test]
    fn test_provider_error_display() {
        assert_eq!(ProviderError::RateLimited.to_string(), "Rate limited");
        assert_eq!(
            ProviderError::NetworkError("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
    }
}
