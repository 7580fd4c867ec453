//! Application configuration
//!
//! Defaults, an optional `config.toml`, and `CHATTERBOX_`-prefixed
//! environment variables, in that order of precedence. The generation API
//! key may also arrive through the conventional `GEMINI_API_KEY` variable;
//! its absence is the one fatal startup error.

mod server;

use ai_core::GenerationConfig;
use ai_speech::SpeechConfig;
use application::error::ApplicationError;
use secrecy::SecretString;
use serde::Deserialize;

pub use server::ServerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Turn pipeline configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// Override for the fixed assistant instruction template
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted generation API settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Speech provider settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Turn pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from defaults, `config.toml`, and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., CHATTERBOX_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("CHATTERBOX")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut app_config: Self = builder.build()?.try_deserialize()?;

        // Conventional variable for the one required secret
        if app_config.generation.api_key.is_none() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                if !key.trim().is_empty() {
                    app_config.generation.api_key = Some(SecretString::from(key));
                }
            }
        }

        Ok(app_config)
    }

    /// Validate the configuration, surfacing the fatal missing-key case
    /// with a message fit for an operator.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.generation.validate().map_err(|_| {
            ApplicationError::Configuration(
                "Generation API key not found. Set GEMINI_API_KEY in the environment \
                 or generation.api_key in config.toml."
                    .to_string(),
            )
        })?;

        self.speech
            .validate()
            .map_err(ApplicationError::Configuration)?;

        Ok(())
    }
}
