//! Configuration for the generation engine

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::GenerationError;

/// Configuration for the hosted generation API
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// API key for the hosted service. Required; startup fails without it.
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Base URL of the generation API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

const fn default_timeout_ms() -> u64 {
    60000 // 60 seconds
}

const fn default_max_output_tokens() -> u32 {
    1024
}

const fn default_temperature() -> f32 {
    0.7
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl GenerationConfig {
    /// Create a config with an API key, defaults for everything else
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// Validate the configuration.
    ///
    /// A missing or empty API key is the one fatal configuration error: the
    /// service must refuse to start rather than accept input it cannot
    /// answer.
    pub fn validate(&self) -> Result<(), GenerationError> {
        match &self.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => Ok(()),
            _ => Err(GenerationError::MissingApiKey),
        }
    }
}
