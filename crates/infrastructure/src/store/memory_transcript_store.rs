//! In-memory transcript store
//!
//! One transcript per open session, held in process memory only. Nothing
//! survives a restart; a session's transcript is destroyed when the session
//! closes.

use std::collections::HashMap;

use application::{error::ApplicationError, ports::TranscriptStorePort};
use async_trait::async_trait;
use domain::{SessionId, Transcript, Turn};
use parking_lot::RwLock;
use tracing::{debug, instrument};

/// Process-memory implementation of the transcript store
#[derive(Debug, Default)]
pub struct InMemoryTranscriptStore {
    sessions: RwLock<HashMap<SessionId, Transcript>>,
}

impl InMemoryTranscriptStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open sessions
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    fn unknown(session: &SessionId) -> ApplicationError {
        ApplicationError::UnknownSession(session.to_string())
    }
}

#[async_trait]
impl TranscriptStorePort for InMemoryTranscriptStore {
    #[instrument(skip(self))]
    async fn open_session(&self) -> Result<SessionId, ApplicationError> {
        let session = SessionId::new();
        self.sessions
            .write()
            .insert(session, Transcript::new(session));

        debug!(session = %session, "Session opened");
        Ok(session)
    }

    #[instrument(skip(self), fields(session = %session))]
    async fn close_session(&self, session: &SessionId) -> Result<(), ApplicationError> {
        self.sessions
            .write()
            .remove(session)
            .map(|_| debug!(session = %session, "Session closed"))
            .ok_or_else(|| Self::unknown(session))
    }

    async fn append(&self, session: &SessionId, turn: Turn) -> Result<(), ApplicationError> {
        let mut sessions = self.sessions.write();
        let transcript = sessions
            .get_mut(session)
            .ok_or_else(|| Self::unknown(session))?;

        transcript.append(turn);
        Ok(())
    }

    #[instrument(skip(self), fields(session = %session))]
    async fn clear(&self, session: &SessionId) -> Result<(), ApplicationError> {
        let mut sessions = self.sessions.write();
        let transcript = sessions
            .get_mut(session)
            .ok_or_else(|| Self::unknown(session))?;

        transcript.clear();
        debug!("Transcript cleared");
        Ok(())
    }

    async fn list(&self, session: &SessionId) -> Result<Vec<Turn>, ApplicationError> {
        let sessions = self.sessions.read();
        let transcript = sessions.get(session).ok_or_else(|| Self::unknown(session))?;

        Ok(transcript.turns().to_vec())
    }
}
