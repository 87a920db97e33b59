//! Chat endpoints.
//!
//! POST /chat -- process one turn against the session's conversation log.
//! DELETE /deletechat/{chatId} -- drop a session's log entirely.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use senpai_types::error::ChatError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for POST /chat.
///
/// Fields are optional so presence can be validated explicitly and each
/// missing field reported by name rather than through a serde error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub chat_id: Option<String>,
    pub prompt: Option<String>,
}

/// Success body for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: u16,
}

/// Success body for DELETE /deletechat/{chatId}.
#[derive(Debug, Serialize)]
pub struct DeleteChatResponse {
    pub message: String,
}

/// POST /chat -- forward the prompt to the provider and return the reply.
///
/// A malformed body or missing field yields 400 before any store or
/// remote access; generation failures become the generic 500 envelope.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let mut missing = Vec::new();
    if body.chat_id.is_none() {
        missing.push("'chatId'");
    }
    if body.prompt.is_none() {
        missing.push("'prompt'");
    }
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Request must be a JSON object with 'chatId' and 'prompt' fields (missing: {})",
            missing.join(", ")
        )));
    }

    // Both present; emptiness is validated by the orchestrator.
    let chat_id = body.chat_id.unwrap_or_default();
    let prompt = body.prompt.unwrap_or_default();

    let response = state.orchestrator.process_turn(&chat_id, &prompt).await?;

    Ok(Json(ChatResponse {
        response,
        status: 200,
    }))
}

/// DELETE /deletechat/{chatId} -- remove a session's conversation log.
pub async fn delete_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<DeleteChatResponse>, AppError> {
    if !state.store.delete_session(&chat_id) {
        return Err(ChatError::SessionNotFound(chat_id).into());
    }
    state.orchestrator.forget_session(&chat_id);
    tracing::info!(chat_id, "chat session deleted");

    Ok(Json(DeleteChatResponse {
        message: format!("Chat {chat_id} is successfully deleted"),
    }))
}
