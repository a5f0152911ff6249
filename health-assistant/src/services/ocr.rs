//! Optical character recognition for uploaded images.
//!
//! The default engine shells out to the Tesseract CLI. Whether OCR is
//! usable is decided once at boot by [`TesseractOcr::probe`]; handlers only
//! ever see an `Option<Arc<dyn OcrEngine>>`.

use crate::config::OcrSettings;
use async_trait::async_trait;
use image::ImageFormat;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Image could not be decoded: {0}")]
    Decode(String),

    #[error("OCR backend not available: {0}")]
    Unavailable(String),

    #[error("OCR failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text recognition over raw image bytes.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;

    fn name(&self) -> &str;
}

/// Tesseract OCR via the command-line binary.
pub struct TesseractOcr {
    binary: String,
    language: String,
}

impl TesseractOcr {
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    /// Boot-time capability check. Returns an engine only when OCR is
    /// enabled and the binary resolves on `PATH`.
    pub fn probe(settings: &OcrSettings) -> Option<Self> {
        if !settings.enabled {
            tracing::info!("OCR disabled by configuration");
            return None;
        }

        match which::which(&settings.tesseract_bin) {
            Ok(path) => {
                tracing::info!(
                    binary = %path.display(),
                    language = %settings.language,
                    "Tesseract OCR available"
                );
                Some(Self::new(&settings.tesseract_bin, &settings.language))
            }
            Err(e) => {
                tracing::warn!(
                    binary = %settings.tesseract_bin,
                    error = %e,
                    "Tesseract not found; image uploads will be rejected (install tesseract-ocr)"
                );
                None
            }
        }
    }

    async fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(OcrError::Failed(format!("tesseract failed: {}", stderr.trim())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::Unavailable(
                format!("{} not found (install tesseract-ocr)", self.binary),
            )),
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

/// Decode the upload and re-encode it as PNG so tesseract never has to
/// guess the input format.
fn normalize_to_png(data: &[u8]) -> Result<NamedTempFile, OcrError> {
    let image = image::load_from_memory(data).map_err(|e| OcrError::Decode(e.to_string()))?;

    let file = tempfile::Builder::new()
        .prefix("health-ocr-")
        .suffix(".png")
        .tempfile()?;

    image
        .save_with_format(file.path(), ImageFormat::Png)
        .map_err(|e| OcrError::Decode(e.to_string()))?;

    Ok(file)
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let data = image.to_vec();
        let file = tokio::task::spawn_blocking(move || normalize_to_png(&data))
            .await
            .map_err(|e| OcrError::Failed(format!("decode task failed: {}", e)))??;

        self.run_tesseract(file.path()).await
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn settings(enabled: bool, binary: &str) -> OcrSettings {
        OcrSettings {
            enabled,
            tesseract_bin: binary.to_string(),
            language: "eng".to_string(),
        }
    }

    fn tiny_png() -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbImage::new(4, 4)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_probe_respects_disabled_flag() {
        assert!(TesseractOcr::probe(&settings(false, "tesseract")).is_none());
    }

    #[test]
    fn test_probe_missing_binary() {
        let missing = settings(true, "tesseract-binary-that-does-not-exist");
        assert!(TesseractOcr::probe(&missing).is_none());
    }

    #[test]
    fn test_normalize_rejects_non_image() {
        let err = normalize_to_png(b"definitely not an image").unwrap_err();
        assert!(matches!(err, OcrError::Decode(_)));
    }

    #[test]
    fn test_normalize_writes_png() {
        let file = normalize_to_png(&tiny_png()).unwrap();
        let written = std::fs::read(file.path()).unwrap();
        assert_eq!(image::guess_format(&written).unwrap(), ImageFormat::Png);
    }

    #[tokio::test]
    async fn test_recognize_reports_missing_binary() {
        let engine = TesseractOcr::new("tesseract-binary-that-does-not-exist", "eng");
        let err = engine.recognize(&tiny_png()).await.unwrap_err();
        assert!(matches!(err, OcrError::Unavailable(_)));
    }
}
