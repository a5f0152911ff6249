pub mod assistant;
pub mod extraction;
pub mod ocr;
pub mod prompts;
pub mod providers;
pub mod report;

pub use assistant::Assistant;
pub use extraction::{ExtractionError, FileExtractor, FileKind, UploadedFile};
pub use ocr::{OcrEngine, TesseractOcr};
pub use report::LabReport;
