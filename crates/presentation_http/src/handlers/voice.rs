//! Voice handler for recorded input
//!
//! Accepts the capture widget's raw audio bytes; the Content-Type header
//! names the container. The response mirrors the chat handler plus the text
//! the recognizer attributed to the user.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

use super::{chat::AssistantReply, parse_session_id};

/// Voice response body
#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceResponse {
    /// Session the turns were appended to
    pub session_id: String,
    /// Text attributed to the user (transcription or the retry prompt)
    pub transcription: String,
    /// The assistant turn, absent when the transcription was empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<AssistantReply>,
}

/// Handle a recorded audio submission
#[instrument(skip(state, headers, body), fields(audio_size = body.len()))]
pub async fn voice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<VoiceResponse>, ApiError> {
    let session = parse_session_id(&id)?;

    if body.is_empty() {
        return Err(ApiError::BadRequest("Audio body is empty".to_string()));
    }

    let mime_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.starts_with("audio/"))
        .ok_or_else(|| {
            ApiError::BadRequest("Content-Type must be an audio type".to_string())
        })?
        .to_string();

    let outcome = state
        .voice_service
        .process_audio(&session, body.to_vec(), &mime_type)
        .await?;

    Ok(Json(VoiceResponse {
        session_id: session.to_string(),
        transcription: outcome.transcription,
        reply: outcome.assistant.as_ref().map(AssistantReply::from_turn),
    }))
}
