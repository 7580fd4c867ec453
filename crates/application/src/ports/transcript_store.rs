//! Transcript storage port
//!
//! The transcript lives in process memory, scoped to one session: the store
//! is created when the session opens and destroyed when it closes. Only the
//! turn pipeline appends; the presentation layer reads and clears.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use domain::{SessionId, Turn};

use crate::error::ApplicationError;

/// Port for per-session transcript storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptStorePort: Send + Sync {
    /// Open a new session with an empty transcript
    async fn open_session(&self) -> Result<SessionId, ApplicationError>;

    /// Close a session and destroy its transcript
    async fn close_session(&self, session: &SessionId) -> Result<(), ApplicationError>;

    /// Append a turn to a session's transcript
    async fn append(&self, session: &SessionId, turn: Turn) -> Result<(), ApplicationError>;

    /// Discard all turns of a session unconditionally
    async fn clear(&self, session: &SessionId) -> Result<(), ApplicationError>;

    /// List a session's turns in conversation order
    async fn list(&self, session: &SessionId) -> Result<Vec<Turn>, ApplicationError>;
}
