//! Chat handlers for typed input

use axum::{
    Json,
    extract::{Path, State},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use domain::Turn;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

use super::parse_session_id;

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message
    pub message: String,
}

/// The assistant's reply as rendered to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Sanitized response text
    pub content: String,
    /// Synthesized speech, base64 MP3, absent when synthesis degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Model that generated the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Generation latency in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl AssistantReply {
    /// Render an assistant turn for the wire
    pub fn from_turn(turn: &Turn) -> Self {
        Self {
            content: turn.content.clone(),
            audio: turn.audio.as_ref().map(|bytes| STANDARD.encode(bytes)),
            model: turn.metadata.as_ref().and_then(|m| m.model.clone()),
            latency_ms: turn.metadata.as_ref().and_then(|m| m.latency_ms),
        }
    }
}

/// Chat response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Session the turn was appended to
    pub session_id: String,
    /// The assistant turn
    pub reply: AssistantReply,
}

/// Handle a typed chat submission
#[instrument(skip(state, request), fields(message_len = request.message.len()))]
pub async fn chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session = parse_session_id(&id)?;

    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".to_string()));
    }

    let assistant = state
        .turn_service
        .process_text(&session, &request.message)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Message cannot be empty".to_string()))?;

    Ok(Json(ChatResponse {
        session_id: session.to_string(),
        reply: AssistantReply::from_turn(&assistant),
    }))
}
