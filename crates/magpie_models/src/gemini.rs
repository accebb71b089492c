//! Gemini `generateContent` REST driver.

use async_trait::async_trait;
use magpie_core::ApiKey;
use magpie_error::{GenerationError, GenerationErrorKind};
use magpie_rotation::TextGenerator;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Stateless Gemini REST client, addressed per call with a key and model.
///
/// Unlike SDK clients bound to a single credential, this driver takes the
/// key on every call so the rotation controller can move freely across its
/// key sequence.
#[derive(Debug, Clone)]
pub struct GeminiDriver {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiDriver {
    /// Driver against the public Gemini endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Driver against a custom endpoint (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for GeminiDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for GeminiDriver {
    #[instrument(skip(self, key, prompt), fields(model = model))]
    async fn generate(
        &self,
        key: &ApiKey,
        model: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", key.expose())])
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Network(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::new(GenerationErrorKind::Http {
                status: status.as_u16(),
                message,
            }));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidResponse(e.to_string()))
        })?;

        let text = payload.text();
        if text.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
        }
        debug!(chars = text.len(), "generation complete");
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_first_candidate() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "Ship it " }, { "text": "twice." }], "role": "model" },
                "finishReason": "STOP"
            }]
        }"#;
        let payload: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.text(), "Ship it twice.");
    }

    #[test]
    fn empty_candidates_yield_empty_text() {
        let payload: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.text(), "");
    }
}
