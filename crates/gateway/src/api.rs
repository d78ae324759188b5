//! HTTP API: chat, history and reset endpoints.
//!
//! Endpoints:
//!
//! - `GET    /ping`              : Liveness check
//! - `POST   /chat`              : Send a message, get a reply and the updated transcript
//! - `GET    /history/{user_id}` : Full transcript for a known user
//! - `DELETE /reset/{user_id}`   : Clear a user's transcript

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use hygienebot_core::{ConversationError, Message, ResetOutcome};

use crate::SharedState;

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
    /// Whose transcript to append to (omit for the configured default user).
    /// An explicit `null` is rejected.
    #[serde(default, deserialize_with = "present_string")]
    pub user_id: Option<String>,
}

fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_history: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

// ── Errors ────────────────────────────────────────────────────────────────

/// Failures surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound(String),
}

impl From<ConversationError> for ApiError {
    fn from(err: ConversationError) -> Self {
        match err {
            ConversationError::NotFound(user_id) => ApiError::UserNotFound(user_id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UserNotFound(_) => StatusCode::NOT_FOUND,
        };
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────

pub(crate) async fn ping_handler(State(state): State<SharedState>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok".into(),
        message: format!("{} is online!", state.bot_name),
    })
}

pub(crate) async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let user_id = payload
        .user_id
        .unwrap_or_else(|| state.default_user_id.clone());

    let reply = state.responder.select(&payload.message);
    let topic = reply.topic.unwrap_or("fallback");
    let response = reply.text.to_string();

    let conversation_history = state
        .store
        .append_turn(&user_id, &payload.message, &response)
        .await;

    let users = state.store.user_count().await;
    info!(
        user_id = %user_id,
        topic,
        messages = conversation_history.len(),
        users,
        "Chat turn recorded"
    );

    Json(ChatResponse {
        response,
        conversation_history,
    })
}

pub(crate) async fn history_handler(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let transcript = state.store.get_transcript(&user_id).await?;
    Ok(Json(transcript))
}

pub(crate) async fn reset_handler(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Json<ResetResponse> {
    let message = match state.store.reset(&user_id).await {
        ResetOutcome::Cleared => {
            info!(user_id = %user_id, "Conversation reset");
            format!("Conversation for user '{user_id}' has been reset.")
        }
        ResetOutcome::NotFound => {
            format!("No conversation history found for user '{user_id}'.")
        }
    };

    Json(ResetResponse { message })
}
