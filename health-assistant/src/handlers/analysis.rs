use crate::dtos::{AnalyzeRequest, AnalyzeResponse, FileAnalysisResponse};
use crate::services::providers::GenerationParams;
use crate::services::{prompts, LabReport, UploadedFile};
use crate::startup::AppState;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    Json,
};

pub const EMPTY_SYMPTOM_MESSAGE: &str = "Please provide a non-empty symptom description.";
pub const NO_FILE_MESSAGE: &str = "No file uploaded. Send a multipart form with a 'file' field.";
pub const UNREADABLE_FILE_MESSAGE: &str = "Failed to read the uploaded file.";

/// `POST /analyze`: symptom triage as free text.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let symptom = request.symptom.trim();
    if symptom.is_empty() {
        return Json(AnalyzeResponse {
            result: EMPTY_SYMPTOM_MESSAGE.to_string(),
        });
    }

    tracing::info!(symptom_len = symptom.len(), "Analyzing symptom description");

    let result = state
        .assistant
        .ask(
            &prompts::symptom_prompt(symptom),
            None,
            &GenerationParams::default(),
        )
        .await;

    Json(AnalyzeResponse { result })
}

/// `POST /analyze-file`: extract text from a lab report or prescription and
/// ask the model for structured metrics.
pub async fn analyze_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<FileAnalysisResponse> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected non-multipart upload");
            return Json(FileAnalysisResponse::failed(NO_FILE_MESSAGE));
        }
    };

    let file = match read_upload(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return Json(FileAnalysisResponse::failed(NO_FILE_MESSAGE)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read multipart upload");
            return Json(FileAnalysisResponse::failed(UNREADABLE_FILE_MESSAGE));
        }
    };

    tracing::info!(
        filename = %file.filename,
        content_type = %file.content_type,
        size = file.data.len(),
        "Received file"
    );

    let text = match state.extractor.extract(&file).await {
        Ok(text) => text,
        Err(e) => {
            tracing::info!(filename = %file.filename, reason = %e, "File rejected");
            return Json(e.into());
        }
    };

    let reply = state
        .assistant
        .ask(
            &prompts::lab_report_prompt(&text),
            None,
            &GenerationParams::json(),
        )
        .await;

    Json(LabReport::from_reply(&reply).into())
}

/// Read the `file` field fully into memory. Other parts are skipped unread,
/// whatever their position in the form.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<UploadedFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await?;

        return Ok(Some(UploadedFile {
            filename,
            content_type,
            data,
        }));
    }

    Ok(None)
}
