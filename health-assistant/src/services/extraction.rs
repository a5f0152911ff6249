//! Upload classification and plain-text extraction.

use super::ocr::{OcrEngine, OcrError};
use axum::body::Bytes;
use std::sync::Arc;
use thiserror::Error;

const TEXT_EXTENSIONS: &[&str] = &[".txt"];
const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg"];
const PDF_EXTENSIONS: &[&str] = &[".pdf"];

/// Why no text came out of an upload. `Display` is the message returned
/// to the client.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Unsupported file type. Send text or image files.")]
    UnsupportedType,

    #[error("PDF parsing not enabled. Please convert PDF to text or image.")]
    PdfNotSupported,

    #[error("OCR is not available. Install tesseract-ocr to analyze images.")]
    OcrUnavailable,

    #[error("OCR failed on the uploaded image.")]
    OcrFailed(#[source] OcrError),

    #[error("No text could be extracted from the file.")]
    NoText,
}

/// How an upload will be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Image,
    Pdf,
    Unsupported,
}

impl FileKind {
    /// Classify by declared content type first, then by filename
    /// extension. Text wins over image; PDFs are only recognised by name.
    pub fn classify(filename: &str, content_type: &str) -> Self {
        let name = filename.to_ascii_lowercase();
        let content_type = content_type.to_ascii_lowercase();
        let has_ext = |exts: &[&str]| exts.iter().any(|ext| name.ends_with(ext));

        if content_type.starts_with("text/") || has_ext(TEXT_EXTENSIONS) {
            FileKind::Text
        } else if content_type.starts_with("image/") || has_ext(IMAGE_EXTENSIONS) {
            FileKind::Image
        } else if has_ext(PDF_EXTENSIONS) {
            FileKind::Pdf
        } else {
            FileKind::Unsupported
        }
    }
}

/// A file read fully into memory from a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn kind(&self) -> FileKind {
        FileKind::classify(&self.filename, &self.content_type)
    }
}

/// Turns uploads into text. Holds the OCR engine found at boot, if any.
#[derive(Clone)]
pub struct FileExtractor {
    ocr: Option<Arc<dyn OcrEngine>>,
}

impl FileExtractor {
    pub fn new(ocr: Option<Arc<dyn OcrEngine>>) -> Self {
        Self { ocr }
    }

    pub fn ocr_available(&self) -> bool {
        self.ocr.is_some()
    }

    pub async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        let text = match file.kind() {
            FileKind::Text => String::from_utf8_lossy(&file.data).into_owned(),
            FileKind::Image => {
                let engine = self.ocr.as_ref().ok_or(ExtractionError::OcrUnavailable)?;
                engine.recognize(&file.data).await.map_err(|e| {
                    tracing::error!(
                        filename = %file.filename,
                        engine = %engine.name(),
                        error = %e,
                        "OCR failed"
                    );
                    ExtractionError::OcrFailed(e)
                })?
            }
            FileKind::Pdf => return Err(ExtractionError::PdfNotSupported),
            FileKind::Unsupported => return Err(ExtractionError::UnsupportedType),
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        Ok(text)
    }
}
