//! Session lifecycle handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

use super::parse_session_id;

/// Response to opening a session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Identifier for subsequent chat, voice, and transcript calls
    pub session_id: String,
}

/// Open a new session with an empty transcript
#[instrument(skip(state))]
pub async fn open_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = state.transcript_store.open_session().await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: session.to_string(),
        }),
    ))
}

/// Close a session, destroying its transcript
#[instrument(skip(state))]
pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = parse_session_id(&id)?;

    state.transcript_store.close_session(&session).await?;
    state.turn_service.forget_session(&session);

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_response_serializes() {
        let resp = SessionResponse {
            session_id: "abc".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("session_id"));
        assert!(json.contains("abc"));
    }
}
