//! Generation request types for the senpai chat relay.
//!
//! These types model the data shape handed to a generation provider:
//! the persona system instruction, the conversation so far, and the new
//! prompt. They are provider-agnostic -- Gemini-specific wire structures
//! live in senpai-infra.

use serde::{Deserialize, Serialize};

use crate::chat::Turn;

/// Request to a generation provider for one assistant reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Fixed persona instruction, configured once at process start.
    pub system_instruction: String,
    /// Conversation history in chronological order, excluding the new prompt.
    pub history: Vec<Turn>,
    /// The new user prompt.
    pub prompt: String,
}

/// Errors from generation provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("provider returned no usable content")]
    EmptyResponse,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
