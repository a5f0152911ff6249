use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for both analysis routes.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default upload limit (20MB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub ocr: OcrSettings,
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// Empty when `GEMINI_API_KEY` is not set; calls then fail softly.
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrSettings {
    /// Operator switch; the binary probe still runs at boot when enabled.
    pub enabled: bool,
    pub tesseract_bin: String,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_bytes: usize,
}

impl AssistantConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        if api_key.trim().is_empty() {
            tracing::warn!(
                "GEMINI_API_KEY is not set; analysis requests will return an error message \
                 until it is configured"
            );
        }

        Ok(AssistantConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
                timeout_secs: parse_or(
                    get_env(
                        "GEMINI_TIMEOUT_SECS",
                        Some(&DEFAULT_TIMEOUT_SECS.to_string()),
                        is_prod,
                    )?,
                    DEFAULT_TIMEOUT_SECS,
                ),
            },
            ocr: OcrSettings {
                enabled: parse_bool(&get_env("OCR_ENABLED", Some("true"), false)?),
                tesseract_bin: get_env("TESSERACT_BIN", Some("tesseract"), false)?,
                language: get_env("OCR_LANGUAGE", Some("eng"), false)?,
            },
            uploads: UploadSettings {
                max_bytes: parse_or(
                    get_env(
                        "MAX_UPLOAD_BYTES",
                        Some(&DEFAULT_MAX_UPLOAD_BYTES.to_string()),
                        false,
                    )?,
                    DEFAULT_MAX_UPLOAD_BYTES,
                ),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: String, default: T) -> T {
    raw.trim().parse().unwrap_or(default)
}

fn parse_bool(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
