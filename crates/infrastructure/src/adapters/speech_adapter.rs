//! Speech adapter - Implements SpeechPort using ai_speech
//!
//! Provider availability is probed exactly once, when the adapter is built
//! at startup; the recorded capabilities are what the pipeline consults.

use std::sync::Arc;

use ai_speech::{
    AudioData, AudioFormat, GoogleSpeechProvider, SpeechConfig, SpeechError, SpeechToText,
    TextToSpeech,
};
use application::error::ApplicationError;
use application::ports::{Capability, SpeechPort, SynthesisResult, TranscriptionResult};
use async_trait::async_trait;
use tracing::{info, instrument, warn};

/// Adapter for the Google speech services
pub struct GoogleSpeechAdapter {
    provider: Arc<GoogleSpeechProvider>,
    recognition: Capability,
    synthesis: Capability,
}

impl std::fmt::Debug for GoogleSpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSpeechAdapter")
            .field("recognition", &self.recognition)
            .field("synthesis", &self.synthesis)
            .finish_non_exhaustive()
    }
}

impl GoogleSpeechAdapter {
    /// Build the adapter and record provider capabilities.
    ///
    /// # Errors
    ///
    /// Returns an error only for invalid configuration; unavailable
    /// providers are recorded, not fatal.
    pub async fn connect(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let provider = GoogleSpeechProvider::new(config)
            .map_err(|e: SpeechError| ApplicationError::Configuration(e.to_string()))?;

        let recognition = if SpeechToText::is_available(&provider).await {
            Capability::Available
        } else {
            Capability::unavailable("speech recognition key not configured")
        };

        let synthesis = if TextToSpeech::is_available(&provider).await {
            Capability::Available
        } else {
            Capability::unavailable("synthesis endpoint not configured")
        };

        if !recognition.is_available() {
            warn!("Speech recognition unavailable, voice input will use the retry prompt");
        }
        if !synthesis.is_available() {
            warn!("Speech synthesis unavailable, assistant turns will be text only");
        }

        info!(
            recognition = recognition.is_available(),
            synthesis = synthesis.is_available(),
            "Speech adapter ready"
        );

        Ok(Self {
            provider: Arc::new(provider),
            recognition,
            synthesis,
        })
    }

    /// Map speech error to application error
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::RateLimited => ApplicationError::RateLimited,
            SpeechError::Configuration(msg) => ApplicationError::Configuration(msg),
            SpeechError::SynthesisFailed(_) | SpeechError::InvalidResponse(_) => {
                ApplicationError::Synthesis(err.to_string())
            },
            other => ApplicationError::Recognition(other.to_string()),
        }
    }
}

#[async_trait]
impl SpeechPort for GoogleSpeechAdapter {
    #[instrument(skip(self, audio), fields(audio_size = audio.len(), mime = %mime_type))]
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        mime_type: String,
    ) -> Result<TranscriptionResult, ApplicationError> {
        let format = AudioFormat::from_mime_type(&mime_type).ok_or_else(|| {
            ApplicationError::Recognition(format!("Unsupported audio type: {mime_type}"))
        })?;

        let transcription = self
            .provider
            .transcribe(AudioData::new(audio, format))
            .await
            .map_err(Self::map_error)?;

        Ok(TranscriptionResult {
            text: transcription.text,
            confidence: transcription.confidence,
        })
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: String) -> Result<SynthesisResult, ApplicationError> {
        let audio = self
            .provider
            .synthesize(&text)
            .await
            .map_err(|e| ApplicationError::Synthesis(e.to_string()))?;

        let mime_type = audio.mime_type();

        Ok(SynthesisResult {
            audio: audio.into_data(),
            mime_type,
        })
    }

    fn recognition_capability(&self) -> Capability {
        self.recognition.clone()
    }

    fn synthesis_capability(&self) -> Capability {
        self.synthesis.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_without_stt_key_degrades_recognition() {
        let adapter = GoogleSpeechAdapter::connect(SpeechConfig::default())
            .await
            .unwrap();

        assert!(!adapter.recognition_capability().is_available());
        assert!(adapter.synthesis_capability().is_available());
    }

    #[tokio::test]
    async fn connect_with_stt_key_enables_recognition() {
        let config = SpeechConfig {
            stt_api_key: Some("key".to_string()),
            ..Default::default()
        };
        let adapter = GoogleSpeechAdapter::connect(config).await.unwrap();

        assert!(adapter.recognition_capability().is_available());
    }

    #[tokio::test]
    async fn transcribe_rejects_unknown_mime_type() {
        let adapter = GoogleSpeechAdapter::connect(SpeechConfig::default())
            .await
            .unwrap();

        let result = adapter
            .transcribe(vec![1, 2, 3], "application/pdf".to_string())
            .await;

        assert!(matches!(result, Err(ApplicationError::Recognition(_))));
    }

    #[test]
    fn rate_limit_maps_to_rate_limited() {
        let mapped = GoogleSpeechAdapter::map_error(SpeechError::RateLimited);
        assert!(matches!(mapped, ApplicationError::RateLimited));
    }

    #[test]
    fn synthesis_failure_maps_to_synthesis() {
        let mapped =
            GoogleSpeechAdapter::map_error(SpeechError::SynthesisFailed("boom".to_string()));
        assert!(matches!(mapped, ApplicationError::Synthesis(_)));
    }

    #[test]
    fn not_recognized_maps_to_recognition() {
        let mapped = GoogleSpeechAdapter::map_error(SpeechError::NotRecognized);
        assert!(matches!(mapped, ApplicationError::Recognition(_)));
    }
}
