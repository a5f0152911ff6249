//! Prompt templates for the two analysis tasks.
//!
//! Everything here is pure string formatting: the same input always yields
//! the same prompt.

/// Instruction prepended to every request unless the caller supplies its own.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful, cautious medical assistant. \
Provide non-diagnostic advice, clearly indicate if the user should seek medical care, \
and suggest follow-up steps and specialist types.";

/// Symptom triage prompt for `POST /analyze`.
pub fn symptom_prompt(symptom: &str) -> String {
    format!(
        "User symptom description:\n\n{symptom}\n\n\
         Please provide:\n\
         1) Short summary of likely causes (2–4 bullet points).\n\
         2) Urgency level (e.g., 'seek immediate care', 'see doctor within 48 hours', \
         'self-care ok').\n\
         3) Practical next steps (3 bullets) and what specialist to consult if needed.\n\
         4) List any red-flag symptoms that should prompt immediate emergency care.\n\
         Be concise and avoid giving definitive medical diagnoses. Use plain language."
    )
}

/// Lab report / prescription extraction prompt for `POST /analyze-file`.
pub fn lab_report_prompt(extracted_text: &str) -> String {
    format!(
        "Here is the extracted text from a lab report or prescription:\n\n{extracted_text}\n\n\
         1) Extract key health metrics (name, value, unit, normal-range if present). \
         Respond as a JSON object with a top-level key 'metrics' \
         (list of objects with name, value, unit, range, normal boolean). \n\
         2) Provide a concise diagnosis summary and recommendations under key 'diagnosis'. \n\n\
         Return only JSON with keys: metrics and diagnosis."
    )
}

/// Combine the system instruction with the task prompt.
pub fn with_system(system: Option<&str>, prompt: &str) -> String {
    let system = system.unwrap_or(DEFAULT_SYSTEM_PROMPT);
    format!("{system}\n\nUser input:\n{prompt}")
}
