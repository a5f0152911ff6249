//! Best-effort decoding of the model's lab-report reply.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One extracted metric, passed through as the model produced it.
pub type Metric = Map<String, Value>;

/// Shaped result of the file-analysis route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabReport {
    pub metrics: Vec<Metric>,
    pub diagnosis: String,
}

#[derive(Deserialize)]
struct RawReport {
    #[serde(default)]
    metrics: Option<Vec<Metric>>,
    #[serde(default)]
    diagnosis: Option<String>,
}

impl LabReport {
    /// Interpret `reply` as `{"metrics": [...], "diagnosis": "..."}`.
    ///
    /// Missing or null keys default to empty values. Anything that does not
    /// parse into that shape yields no metrics and the whole reply as the
    /// diagnosis.
    pub fn from_reply(reply: &str) -> Self {
        match serde_json::from_str::<RawReport>(reply) {
            Ok(raw) => Self {
                metrics: raw.metrics.unwrap_or_default(),
                diagnosis: raw.diagnosis.unwrap_or_default(),
            },
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    "Model reply is not a lab report object; using raw text"
                );
                Self {
                    metrics: Vec::new(),
                    diagnosis: reply.to_string(),
                }
            }
        }
    }
}
