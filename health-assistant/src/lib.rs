//! Health Track assistant: symptom triage and lab-report analysis backed
//! by Gemini, with optional Tesseract OCR for image uploads.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod startup;
