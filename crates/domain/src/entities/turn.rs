//! Turn entity - one message in a conversation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of the turn's author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Turn supplied by the user (typed or transcribed)
    User,
    /// Turn produced by the assistant
    Assistant,
}

/// A single turn in a transcript
///
/// Turns are immutable once appended. An assistant turn is only constructed
/// after generation and sanitization have completed; it carries audio only
/// when synthesis succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Unique turn identifier
    pub id: Uuid,
    /// Role of the author
    pub role: TurnRole,
    /// Turn content
    pub content: String,
    /// Synthesized speech for this turn, if any (base64 in JSON)
    #[serde(default, skip_serializing_if = "Option::is_none", with = "audio_base64")]
    pub audio: Option<Vec<u8>>,
    /// When the turn was appended
    pub created_at: DateTime<Utc>,
    /// Optional metadata (model used, latency)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TurnMetadata>,
}

/// Optional metadata about an assistant turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnMetadata {
    /// Model that generated this response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Generation latency in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl Turn {
    /// Create a new user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: TurnRole::User,
            content: content.into(),
            audio: None,
            created_at: Utc::now(),
            metadata: None,
        }
    }

    /// Create a new assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: TurnRole::Assistant,
            content: content.into(),
            audio: None,
            created_at: Utc::now(),
            metadata: None,
        }
    }

    /// Attach synthesized audio to the turn
    pub fn with_audio(mut self, audio: Vec<u8>) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Add metadata to the turn
    pub fn with_metadata(mut self, metadata: TurnMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Whether the turn carries playable audio
    pub const fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

/// Serde helper: audio bytes as base64 strings in JSON
mod audio_base64 {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        audio: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match audio {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
