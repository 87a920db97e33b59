//! GeminiProvider -- concrete [`GenerationProvider`] implementation for the
//! Google Generative Language API.
//!
//! Sends non-streaming `generateContent` requests with the API key in the
//! `x-goog-api-key` header. The key is wrapped in [`secrecy::SecretString`]
//! and is never logged or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use senpai_core::llm::GenerationProvider;
use senpai_types::chat::TurnRole;
use senpai_types::llm::{GenerationRequest, LlmError};

use super::types::{
    GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, GeminiSystemInstruction,
};

/// Google Gemini generation provider.
///
/// Implements [`GenerationProvider`] over the `generateContent` endpoint.
/// A single attempt per request -- no retry policy.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Create a new Gemini provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gemini-2.0-flash")
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
        }
    }

    /// The model this provider targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Convert a generic [`GenerationRequest`] into the Gemini wire shape.
    ///
    /// History turns become `contents` entries in order; the new prompt is
    /// the final "user" entry; the persona instruction goes into
    /// `systemInstruction`.
    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        let mut contents: Vec<GeminiContent> = request
            .history
            .iter()
            .map(|turn| GeminiContent {
                role: match turn.role {
                    TurnRole::User => "user".to_string(),
                    TurnRole::Model => "model".to_string(),
                },
                parts: vec![GeminiPart {
                    text: turn.text.clone(),
                }],
            })
            .collect();

        contents.push(GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: request.prompt.clone(),
            }],
        });

        let system_instruction = if request.system_instruction.is_empty() {
            None
        } else {
            Some(GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: request.system_instruction.clone(),
                }],
            })
        };

        GeminiRequest {
            contents,
            system_instruction,
        }
    }

    /// Extract the reply text from a parsed response.
    ///
    /// Joins the text parts of the first candidate. Missing candidates or
    /// an all-empty part list map to [`LlmError::EmptyResponse`].
    fn extract_text(response: GeminiResponse) -> Result<String, LlmError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        let text: String = parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

// GeminiProvider intentionally does NOT derive Debug so the credential
// never reaches formatted output.

impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let body = Self::to_gemini_request(request);
        tracing::debug!(
            model = %self.model,
            contents = body.contents.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                400 => LlmError::InvalidRequest(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Self::extract_text(gemini_resp)
    }
}
