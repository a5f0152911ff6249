//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

enum MockBehavior {
    Reply(String),
    Fail(ProviderError),
}

/// Mock text provider that returns a canned reply (or error) and records
/// every prompt it receives.
pub struct MockTextProvider {
    behavior: MockBehavior,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    /// Provider that always answers with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Reply(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Provider whose every call fails with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            behavior: MockBehavior::Fail(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(ProviderResponse {
                text: Some(text.clone()),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            MockBehavior::Fail(err) => Err(err.clone()),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn model(&self) -> &str {
        "mock"
    }
}
