use crate::services::{ExtractionError, LabReport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub symptom: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `POST /analyze-file`. Failures travel as an `error` field with
/// status 200.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FileAnalysisResponse {
    Failed { error: String },
    Report(LabReport),
}

impl FileAnalysisResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        FileAnalysisResponse::Failed {
            error: message.into(),
        }
    }
}

impl From<ExtractionError> for FileAnalysisResponse {
    fn from(err: ExtractionError) -> Self {
        FileAnalysisResponse::failed(err.to_string())
    }
}

impl From<LabReport> for FileAnalysisResponse {
    fn from(report: LabReport) -> Self {
        FileAnalysisResponse::Report(report)
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub model: String,
    pub ocr_available: bool,
    pub provider_configured: bool,
}
