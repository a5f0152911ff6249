//! HTTP handlers for the health assistant.

pub mod analysis;
pub mod health;

pub use analysis::{analyze, analyze_file};
pub use health::{health_check, not_found, root};
