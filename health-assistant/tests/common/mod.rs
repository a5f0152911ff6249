#![allow(dead_code)]

use async_trait::async_trait;
use health_assistant::config::{AssistantConfig, GeminiSettings, OcrSettings, UploadSettings};
use health_assistant::services::ocr::{OcrEngine, OcrError};
use health_assistant::services::providers::TextProvider;
use health_assistant::startup::{AppState, Application};
use service_core::config::Config as CoreConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const TEST_UPLOAD_LIMIT: usize = 64 * 1024;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

pub fn test_config() -> AssistantConfig {
    AssistantConfig {
        common: CoreConfig { port: 0 },
        gemini: GeminiSettings {
            api_key: "test-api-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            timeout_secs: 5,
        },
        ocr: OcrSettings {
            enabled: false,
            tesseract_bin: "tesseract".to_string(),
            language: "eng".to_string(),
        },
        uploads: UploadSettings {
            max_bytes: TEST_UPLOAD_LIMIT,
        },
    }
}

impl TestApp {
    pub async fn spawn(
        provider: Arc<dyn TextProvider>,
        ocr: Option<Arc<dyn OcrEngine>>,
    ) -> Self {
        let state = AppState::new(test_config(), provider, ocr);
        let app = Application::build_with_state(state)
            .await
            .expect("Failed to build test application");
        Self::launch(app).await
    }

    /// Boot through the production wiring (real Gemini client, OCR lookup).
    pub async fn spawn_with_config(config: AssistantConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build application from config");
        Self::launch(app).await
    }

    async fn launch(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_symptom(&self, symptom: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/analyze", self.address))
            .json(&serde_json::json!({ "symptom": symptom }))
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn upload(&self, filename: &str, mime: &str, data: Vec<u8>) -> reqwest::Response {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(mime)
            .expect("Invalid mime type");
        let form = reqwest::multipart::Form::new().part("file", part);

        self.client
            .post(format!("{}/analyze-file", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send request")
    }
}

/// OCR engine returning fixed text and counting calls.
pub struct StubOcr {
    text: String,
    calls: AtomicUsize,
}

impl StubOcr {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrEngine for StubOcr {
    async fn recognize(&self, _image: &[u8]) -> Result<String, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }

    fn name(&self) -> &str {
        "stub"
    }
}
