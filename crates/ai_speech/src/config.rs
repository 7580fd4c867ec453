//! Configuration for speech processing

use serde::Deserialize;

/// Configuration for the speech providers
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Base URL of the speech recognition service
    #[serde(default = "default_stt_base_url")]
    pub stt_base_url: String,

    /// API key for the recognition service. Voice input degrades to the
    /// retry prompt when absent; this is not a startup failure.
    #[serde(default)]
    pub stt_api_key: Option<String>,

    /// Sample rate hint sent with recognition requests
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: u32,

    /// Base URL of the synthesis service
    #[serde(default = "default_tts_base_url")]
    pub tts_base_url: String,

    /// Language tag for recognition and synthesis
    #[serde(default = "default_language")]
    pub language: String,

    /// Slow speaking rate for synthesis (normal rate when false)
    #[serde(default)]
    pub slow: bool,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum text length accepted by the synthesis endpoint
    #[serde(default = "default_max_tts_chars")]
    pub max_tts_chars: usize,
}

fn default_stt_base_url() -> String {
    "http://www.google.com".to_string()
}

fn default_tts_base_url() -> String {
    "https://translate.google.com".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

const fn default_sample_rate_hz() -> u32 {
    16000
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_max_tts_chars() -> usize {
    200
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_base_url: default_stt_base_url(),
            stt_api_key: None,
            sample_rate_hz: default_sample_rate_hz(),
            tts_base_url: default_tts_base_url(),
            language: default_language(),
            slow: false,
            timeout_ms: default_timeout_ms(),
            max_tts_chars: default_max_tts_chars(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tts_base_url.trim().is_empty() {
            return Err("tts_base_url must not be empty".to_string());
        }
        if self.stt_base_url.trim().is_empty() {
            return Err("stt_base_url must not be empty".to_string());
        }
        if self.language.trim().is_empty() {
            return Err("language must not be empty".to_string());
        }
        Ok(())
    }

    /// Whether recognition is configured at all
    #[must_use]
    pub fn recognition_configured(&self) -> bool {
        self.stt_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}
