//! Gemini AI provider implementation.
//!
//! Calls the `generateContent` REST method of Google's Generative Language
//! API and flattens the first candidate into plain text.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API key, kept out of the URL so it never shows up in
/// reqwest error strings.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    /// Build the API URL for the given method. Accepts model ids with or
    /// without the `models/` prefix.
    fn api_url(&self, method: &str) -> String {
        let model = self
            .config
            .model
            .strip_prefix("models/")
            .unwrap_or(&self.config.model);
        format!(
            "{}/models/{}:{}",
            self.config.api_base.trim_end_matches('/'),
            model,
            method
        )
    }

    fn build_request(prompt: &str, params: &GenerationParams) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: params.json_output.then(|| GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        }
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.health_check().await?;

        let request = Self::build_request(prompt, params);
        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            json_output = params.json_output,
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            ProviderError::ApiError(format!("Failed to parse response: {}", e.without_url()))
        })?;

        api_response.into_provider_response()
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "GEMINI_API_KEY is not set".to_string(),
            ))
        }
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

/// Only text parts are of interest; other part kinds deserialize with
/// `text: None` and are skipped.
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_provider_response(self) -> Result<ProviderResponse, ProviderError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
                tracing::warn!(block_reason = %reason, "Gemini blocked the prompt");
                return Err(ProviderError::ContentFiltered);
            }
            return Err(ProviderError::ApiError(
                "Response contained no candidates".to_string(),
            ));
        };

        let finish_reason = FinishReason::from_api(candidate.finish_reason.as_deref());
        if finish_reason == FinishReason::ContentFilter {
            return Err(ProviderError::ContentFiltered);
        }

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        let usage = self.usage_metadata.unwrap_or_default();

        Ok(ProviderResponse {
            text: if text.is_empty() { None } else { Some(text) },
            input_tokens: usage.prompt_token_count.unwrap_or(0),
            output_tokens: usage.candidates_token_count.unwrap_or(0),
            finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config(api_base: &str, api_key: &str) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.to_string(),
            model: "models/gemini-2.5-flash".to_string(),
            api_base: api_base.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_api_url_strips_models_prefix() {
        let provider =
            GeminiTextProvider::new(test_config("https://example.test/v1beta/", "k")).unwrap();
        assert_eq!(
            provider.api_url("generateContent"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_serialization() {
        let plain = GeminiTextProvider::build_request("hello", &GenerationParams::default());
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );

        let structured = GeminiTextProvider::build_request("hello", &GenerationParams::json());
        let value = serde_json::to_value(&structured).unwrap();
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_response_concatenates_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Rest and "}, {"text": "hydrate."}]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4}
        }))
        .unwrap();

        let result = response.into_provider_response().unwrap();
        assert_eq!(result.text.as_deref(), Some("Rest and hydrate."));
        assert_eq!(result.input_tokens, 12);
        assert_eq!(result.output_tokens, 4);
        assert_eq!(result.finish_reason, FinishReason::Complete);
    }

    #[test]
    fn test_response_without_candidates() {
        let blocked: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert_eq!(
            blocked.into_provider_response().unwrap_err(),
            ProviderError::ContentFiltered
        );

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            empty.into_provider_response(),
            Err(ProviderError::ApiError(_))
        ));
    }

    #[test]
    fn test_safety_finish_is_filtered() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert_eq!(
            response.into_provider_response().unwrap_err(),
            ProviderError::ContentFiltered
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let provider = GeminiTextProvider::new(test_config("http://127.0.0.1:9", "")).unwrap();
        assert!(!provider.is_configured());
        assert_eq!(
            provider.health_check().await,
            Err(ProviderError::NotConfigured(
                "GEMINI_API_KEY is not set".to_string()
            ))
        );

        let err = provider
            .generate("hi", &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
