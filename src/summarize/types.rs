// Wire types shared by the summarization relay and its client.
// Request/response bodies for the relay and the hosted inference API.

use serde::{Deserialize, Serialize};

/// Only this many characters of a document are ever summarized.
pub const MAX_INPUT_CHARS: usize = 1024;

/// Output bounds passed to the summarization model.
pub const SUMMARY_MAX_LENGTH: u32 = 150;
pub const SUMMARY_MIN_LENGTH: u32 = 30;

/// Shown in place of a summary when summarization fails.
pub const SUMMARY_FALLBACK: &str = "Failed to generate summary";

/// Keep the first `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Which document a summary is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Readme,
    Contributing,
}

impl DocumentKind {
    pub fn is_contributing(&self) -> bool {
        matches!(self, DocumentKind::Contributing)
    }
}

/// Body of `POST /api/summarize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_contributing: bool,
}

/// One element of the model's response array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary_text: String,
}

/// Error body returned by the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
}

/// Request forwarded to the hosted summarization model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub inputs: String,
    pub parameters: InferenceParameters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceParameters {
    pub max_length: u32,
    pub min_length: u32,
}

impl Default for InferenceParameters {
    fn default() -> Self {
        Self {
            max_length: SUMMARY_MAX_LENGTH,
            min_length: SUMMARY_MIN_LENGTH,
        }
    }
}
