//! Axum route handlers for the Chat API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::chat::session::{ChatInput, ChatReply};
use crate::errors::AppError;
use crate::llm_client::Message;
use crate::profile::normalize_email;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<Message>,
}

/// POST /api/v1/chat/:email/messages
///
/// Sends one user turn. Always answers with `{text}`: a failed generation
/// yields the apology, never an error status.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(input): Json<ChatInput>,
) -> Result<Json<ChatReply>, AppError> {
    let email = normalize_email(&email)?;
    if input.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let session = state
        .sessions
        .get_or_restore(&email, &state.llm, state.store.as_ref())
        .await?;
    let mut session = session.lock().await;

    let reply = session.send_message(input).await;

    if let Err(e) = state.store.save_history(&email, session.history()).await {
        error!("Failed to persist chat history for {email}: {e}");
    }

    Ok(Json(reply))
}

/// GET /api/v1/chat/:email/history
pub async fn handle_chat_history(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    let email = normalize_email(&email)?;

    let messages = match state.sessions.get(&email).await {
        Some(session) => session.lock().await.history().to_vec(),
        None => state.store.load_history(&email).await?.unwrap_or_default(),
    };

    Ok(Json(ChatHistoryResponse { messages }))
}

/// DELETE /api/v1/chat/:email
///
/// Drops the live session and the stored transcript.
pub async fn handle_clear_chat(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<StatusCode, AppError> {
    let email = normalize_email(&email)?;
    state.sessions.remove(&email).await;
    state.store.clear_history(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}
