//! GenerationProvider trait definition.
//!
//! This is the abstraction the orchestrator calls instead of the remote
//! generative-language service directly, so tests can substitute a fake
//! (canned text, simulated failure) without network access.

use senpai_types::llm::{GenerationRequest, LlmError};

/// Trait for remote generation backends (Gemini, or a fake in tests).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in senpai-infra (e.g., `GeminiProvider`).
pub trait GenerationProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Produce one assistant reply for the given system instruction,
    /// history, and new prompt. A single attempt -- no retries.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
