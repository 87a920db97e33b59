//! Gemini `generateContent` API types.
//!
//! These are Gemini-specific request/response structures for HTTP
//! communication with the Generative Language API. They are NOT the
//! provider-agnostic types from senpai-types.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiSystemInstruction>,
}

/// One conversation entry; `role` is "user" or "model".
#[derive(Debug, Clone, Serialize)]
pub struct GeminiContent {
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

/// System instruction block. Carries no role.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiSystemInstruction {
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

/// Response body for a non-streaming `generateContent` call.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidateContent {
    #[serde(default)]
    pub parts: Vec<GeminiCandidatePart>,
}

/// A response part. Non-text parts deserialize with `text: None`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}
