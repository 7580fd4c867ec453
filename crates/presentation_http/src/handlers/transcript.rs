//! Transcript handlers

use axum::{
    Json,
    extract::{Path, State},
};
use domain::Turn;
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

use super::parse_session_id;

/// Transcript response body
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    /// Owning session
    pub session_id: String,
    /// Turns in conversation order
    pub turns: Vec<Turn>,
}

/// List a session's turns in conversation order
#[instrument(skip(state))]
pub async fn list_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let session = parse_session_id(&id)?;
    let turns = state.transcript_store.list(&session).await?;

    Ok(Json(TranscriptResponse {
        session_id: session.to_string(),
        turns,
    }))
}

/// Clear a session's transcript (explicit user action; the response carries
/// the now-empty transcript so clients can re-render from it)
#[instrument(skip(state))]
pub async fn clear_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let session = parse_session_id(&id)?;
    state.transcript_store.clear(&session).await?;

    Ok(Json(TranscriptResponse {
        session_id: session.to_string(),
        turns: Vec::new(),
    }))
}
