// Summarization relay client.
// Sends document text to the relay and extracts the model's summary.

use reqwest::Client;

use crate::error::{AppError, Result};

use super::types::{
    DocumentKind, ErrorBody, MAX_INPUT_CHARS, SUMMARY_FALLBACK, SummarizeRequest, SummaryResult,
    truncate_chars,
};

pub const DEFAULT_RELAY_URL: &str = "http://localhost:3001";

/// Client for the relay's `/api/summarize` endpoint.
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: Client,
    endpoint: String,
}

impl Summarizer {
    /// Create a summarizer talking to the relay at `relay_url`.
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/summarize", relay_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Summarize the first 1024 characters of `text`.
    pub async fn summarize(&self, text: &str, kind: DocumentKind) -> Result<String> {
        let request = SummarizeRequest {
            text: truncate_chars(text, MAX_INPUT_CHARS).to_string(),
            is_contributing: kind.is_contributing(),
        };

        tracing::debug!(endpoint = %self.endpoint, ?kind, "Sending summarize request");
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("relay responded with {}", status),
            };
            return Err(AppError::Summarization(message));
        }

        let results: Vec<SummaryResult> = response.json().await?;
        results
            .into_iter()
            .next()
            .map(|result| result.summary_text)
            .ok_or_else(|| AppError::Summarization("no summary in response".to_string()))
    }

    /// Summarize, substituting a fixed message when anything goes wrong.
    pub async fn summarize_or_fallback(&self, text: &str, kind: DocumentKind) -> String {
        match self.summarize(text, kind).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, ?kind, "Error summarizing text");
                SUMMARY_FALLBACK.to_string()
            }
        }
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_URL)
    }
}
