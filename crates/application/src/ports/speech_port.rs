//! Speech port - Interface for speech-to-text and text-to-speech operations

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a transcription operation
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    /// Transcribed text
    pub text: String,
    /// Confidence score (0.0 - 1.0), if the provider reports one
    pub confidence: Option<f32>,
}

/// Result of a speech synthesis operation
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Generated audio bytes in a compressed container
    pub audio: Vec<u8>,
    /// MIME type of the container (e.g. "audio/mpeg")
    pub mime_type: &'static str,
}

/// Availability of a provider, probed once at startup and injected into the
/// pipeline instead of being re-tested at each call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// Provider responded to the startup probe
    Available,
    /// Provider could not be reached or is not configured
    Unavailable {
        /// Human-readable reason recorded at probe time
        reason: String,
    },
}

impl Capability {
    /// Create an unavailable capability with a reason
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Whether the provider can be called
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Port for speech processing operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Transcribe recorded audio to text (Speech-to-Text)
    ///
    /// `mime_type` identifies the container the capture widget produced.
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        mime_type: String,
    ) -> Result<TranscriptionResult, ApplicationError>;

    /// Synthesize speech from sanitized text (Text-to-Speech)
    async fn synthesize(&self, text: String) -> Result<SynthesisResult, ApplicationError>;

    /// Recognition capability recorded at startup
    fn recognition_capability(&self) -> Capability;

    /// Synthesis capability recorded at startup
    fn synthesis_capability(&self) -> Capability;
}
