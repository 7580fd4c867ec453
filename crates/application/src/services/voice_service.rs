//! Voice service - speech front-end for the turn pipeline
//!
//! Turns recorded audio into user text and hands it to the turn pipeline.
//! Recognition failures never surface to the user: the fixed retry sentence
//! is substituted as if the user had typed it.

use std::{fmt, sync::Arc};

use domain::{SessionId, Turn};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{Capability, SpeechPort},
    prompt,
    services::TurnService,
};

/// Outcome of one voice submission
#[derive(Debug)]
pub struct VoiceTurnOutcome {
    /// Text attributed to the user (transcription or the retry substitute)
    pub transcription: String,
    /// The assistant turn, absent when the transcription was empty
    pub assistant: Option<Turn>,
}

/// Service handling spoken input
pub struct VoiceService {
    speech: Arc<dyn SpeechPort>,
    turns: Arc<TurnService>,
}

impl fmt::Debug for VoiceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceService").finish_non_exhaustive()
    }
}

impl VoiceService {
    /// Create a new voice service
    pub fn new(speech: Arc<dyn SpeechPort>, turns: Arc<TurnService>) -> Self {
        Self { speech, turns }
    }

    /// Run the pipeline for one recorded audio clip.
    ///
    /// The clip is transcribed and the text processed exactly like typed
    /// input. A recognition failure (provider error, "not recognized"
    /// sentinel, or an unavailable recognizer) substitutes the fixed retry
    /// sentence; an empty transcription is a no-op like empty typed input.
    #[instrument(skip(self, audio), fields(session = %session, audio_size = audio.len(), mime = %mime_type))]
    pub async fn process_audio(
        &self,
        session: &SessionId,
        audio: Vec<u8>,
        mime_type: &str,
    ) -> Result<VoiceTurnOutcome, ApplicationError> {
        let transcription = self.transcribe(audio, mime_type).await;

        debug!(transcription = %transcription, "Voice input resolved to text");

        let assistant = self.turns.process_text(session, &transcription).await?;

        Ok(VoiceTurnOutcome {
            transcription,
            assistant,
        })
    }

    /// Transcribe audio, substituting the retry sentence on failure.
    async fn transcribe(&self, audio: Vec<u8>, mime_type: &str) -> String {
        match self.speech.recognition_capability() {
            Capability::Available => {},
            Capability::Unavailable { reason } => {
                warn!(reason = %reason, "Recognition unavailable, substituting retry prompt");
                return prompt::RECOGNITION_RETRY.to_string();
            },
        }

        match self.speech.transcribe(audio, mime_type.to_string()).await {
            Ok(result) => result.text,
            Err(e) => {
                warn!(error = %e, "Recognition failed, substituting retry prompt");
                prompt::RECOGNITION_RETRY.to_string()
            },
        }
    }
}
