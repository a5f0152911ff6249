//! Model invocation with a fail-soft contract.
//!
//! [`Assistant::generate`] returns a typed result; [`Assistant::ask`] folds
//! every failure into a marker-prefixed string so route handlers always
//! have something to put in a 200 body.

use super::prompts;
use super::providers::{FinishReason, GenerationParams, ProviderError, TextProvider};
use std::sync::Arc;

/// Prefix of the reply returned in place of an upstream failure.
pub const ERROR_MARKER: &str = "[Gemini error]";

/// Reply used when the model answers with no text.
pub const NO_RESPONSE: &str = "[No response]";

#[derive(Clone)]
pub struct Assistant {
    provider: Arc<dyn TextProvider>,
}

impl Assistant {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Whether the provider can take requests at all.
    pub async fn is_ready(&self) -> bool {
        match self.provider.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    model = %self.provider.model(),
                    error = %e,
                    "Provider not ready"
                );
                false
            }
        }
    }

    /// Send `prompt` prefixed with `system` (or the default medical
    /// assistant instruction) and return the trimmed reply.
    pub async fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let full_prompt = prompts::with_system(system, prompt);
        let response = self.provider.generate(&full_prompt, params).await?;

        tracing::debug!(
            model = %self.provider.model(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Model call completed"
        );

        if response.finish_reason == FinishReason::Length {
            tracing::warn!(model = %self.provider.model(), "Model reply was truncated");
        }

        let text = response
            .text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_RESPONSE.to_string());

        Ok(text)
    }

    /// Like [`generate`](Self::generate) but never fails.
    pub async fn ask(
        &self,
        prompt: &str,
        system: Option<&str>,
        params: &GenerationParams,
    ) -> String {
        match self.generate(prompt, system, params).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(
                    model = %self.provider.model(),
                    error = %e,
                    "Model request failed"
                );
                format!("{} {}", ERROR_MARKER, e)
            }
        }
    }
}
