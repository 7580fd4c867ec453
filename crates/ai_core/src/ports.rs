//! Port definitions for the generation engine
//!
//! Defines the trait that generation adapters implement and the request and
//! streaming types shared with them.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Request for text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Fixed instruction template sent as the system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    /// The user's message
    pub user_text: String,
    /// Temperature override for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum output tokens override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Create a simple single-turn request
    pub fn simple(user_text: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            user_text: user_text.into(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Create a request with a system instruction
    pub fn with_system(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system_instruction: Some(system.into()),
            user_text: user.into(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Set temperature
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set the output token cap
    pub const fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

/// A fragment of a streaming response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Content delta
    pub text: String,
    /// Whether this is the final fragment
    pub done: bool,
    /// Model name (reported on the final fragment)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Type alias for a streaming response
pub type StreamingResponse =
    Pin<Box<dyn Stream<Item = Result<StreamChunk, GenerationError>> + Send>>;

/// Port for generation engine implementations
#[async_trait]
pub trait GenerationEngine: Send + Sync {
    /// Generate a streaming response
    async fn generate_stream(
        &self,
        request: GenerationRequest,
    ) -> Result<StreamingResponse, GenerationError>;

    /// Check if the hosted service is reachable with the configured key
    async fn check_availability(&self) -> Result<bool, GenerationError>;

    /// List models offered by the service
    async fn list_models(&self) -> Result<Vec<String>, GenerationError>;

    /// Get the configured model
    fn default_model(&self) -> &str;
}
