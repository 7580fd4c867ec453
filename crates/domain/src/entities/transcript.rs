//! Transcript entity - the ordered turn history of one session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Turn, TurnRole};
use crate::value_objects::SessionId;

/// The ordered, append-only history of turns for one session
///
/// Insertion order is conversation order. The sequence is unbounded and is
/// only ever emptied wholesale by [`Transcript::clear`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Owning session
    pub session_id: SessionId,
    /// Turns in conversation order (oldest first)
    turns: Vec<Turn>,
    /// When the transcript was created
    pub created_at: DateTime<Utc>,
    /// When the transcript last changed
    pub updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Create a new empty transcript for a session
    pub fn new(session_id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a turn to the end of the transcript
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.updated_at = Utc::now();
    }

    /// Discard all turns unconditionally
    pub fn clear(&mut self) {
        self.turns.clear();
        self.updated_at = Utc::now();
    }

    /// Turns in conversation order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Get the last turn, if any
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Get the number of turns
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Check if the transcript is empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Check the conversation-order invariant: every assistant turn is
    /// preceded somewhere earlier by at least one user turn.
    pub fn is_well_ordered(&self) -> bool {
        let mut seen_user = false;
        for turn in &self.turns {
            match turn.role {
                TurnRole::User => seen_user = true,
                TurnRole::Assistant if !seen_user => return false,
                TurnRole::Assistant => {},
            }
        }
        true
    }
}
