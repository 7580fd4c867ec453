//! Google web speech provider
//!
//! Implements `SpeechToText` against the Google web speech API and
//! `TextToSpeech` against the Translate TTS endpoint. One provider carries
//! both directions because they share the HTTP client and language config.
//!
//! # Recognition response format
//!
//! The recognize endpoint answers with JSON lines; the first line is usually
//! an empty `{"result":[]}` placeholder and a later line carries the
//! alternatives. No non-empty result on any line is the provider's
//! "not recognized" sentinel.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioData, AudioFormat, Transcription};

/// Google speech provider implementing both STT and TTS
#[derive(Debug, Clone)]
pub struct GoogleSpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl GoogleSpeechProvider {
    /// Create a new Google speech provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Build the recognition endpoint URL
    fn stt_url(&self) -> String {
        format!("{}/speech-api/v2/recognize", self.config.stt_base_url)
    }

    /// Build the synthesis endpoint URL
    fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.config.tts_base_url)
    }

    /// Content type the recognizer expects for a given container
    fn stt_content_type(&self, format: AudioFormat) -> String {
        format!("{}; rate={}", format.mime_type(), self.config.sample_rate_hz)
    }

    /// Pick the best transcript out of the JSON-lines response body
    fn parse_recognition_body(body: &str) -> Result<Transcription, SpeechError> {
        for line in body.lines().filter(|line| !line.trim().is_empty()) {
            let parsed: RecognizeResponse = serde_json::from_str(line)
                .map_err(|e| SpeechError::InvalidResponse(format!("JSON parse error: {e}")))?;

            let Some(result) = parsed.result.first() else {
                continue;
            };
            let Some(alternative) = result.alternative.first() else {
                continue;
            };

            let mut transcription = Transcription::new(alternative.transcript.clone());
            if let Some(confidence) = alternative.confidence {
                transcription = transcription.with_confidence(confidence);
            }
            return Ok(transcription);
        }

        Err(SpeechError::NotRecognized)
    }
}

/// One line of the recognize endpoint's response
#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    result: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternative: Vec<RecognizeAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognizeAlternative {
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}

#[async_trait]
impl SpeechToText for GoogleSpeechProvider {
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes(), format = ?audio.format()))]
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
        let Some(api_key) = self.config.stt_api_key.clone() else {
            return Err(SpeechError::NotAvailable(
                "speech recognition key not configured".to_string(),
            ));
        };

        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        debug!("Transcribing audio with Google web speech");

        let content_type = self.stt_content_type(audio.format());
        let lang = self.config.language.clone();

        let response = self
            .client
            .post(self.stt_url())
            .query(&[
                ("client", "chromium".to_string()),
                ("lang", lang),
                ("key", api_key),
                ("pFilter", "0".to_string()),
            ])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(audio.into_data())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Recognition request failed");
            if status.as_u16() == 429 {
                return Err(SpeechError::RateLimited);
            }
            return Err(SpeechError::TranscriptionFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?;

        let transcription = Self::parse_recognition_body(&body)?;

        debug!(
            text_len = transcription.text.len(),
            confidence = ?transcription.confidence,
            "Transcription complete"
        );

        Ok(transcription)
    }

    async fn is_available(&self) -> bool {
        self.config.recognition_configured()
    }
}

#[async_trait]
impl TextToSpeech for GoogleSpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<AudioData, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed("Text is empty".to_string()));
        }
        if text.chars().count() > self.config.max_tts_chars {
            return Err(SpeechError::SynthesisFailed(format!(
                "Text exceeds {} characters",
                self.config.max_tts_chars
            )));
        }

        debug!("Synthesizing speech with Translate TTS");

        let speed = if self.config.slow { "0.24" } else { "1" };
        let textlen = text.chars().count().to_string();

        let response = self
            .client
            .get(self.tts_url())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.config.language.as_str()),
                ("ttsspeed", speed),
                ("textlen", textlen.as_str()),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Synthesis request failed");
            if status.as_u16() == 429 {
                return Err(SpeechError::RateLimited);
            }
            return Err(SpeechError::SynthesisFailed(format!("HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.starts_with("audio/") {
            return Err(SpeechError::InvalidResponse(format!(
                "Expected audio, got {content_type}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?;

        if bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Empty audio response".to_string(),
            ));
        }

        debug!(audio_size = bytes.len(), "Synthesis complete");

        Ok(AudioData::new(bytes.to_vec(), AudioFormat::Mp3))
    }

    async fn is_available(&self) -> bool {
        // Keyless endpoint: configured means usable; transport failures
        // degrade per turn.
        self.config.validate().is_ok()
    }
}
