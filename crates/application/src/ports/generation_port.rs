//! Generation port - Interface for hosted LLM text generation

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ApplicationError;

/// One streamed fragment of a response
#[derive(Debug, Clone)]
pub struct GenerationChunk {
    /// Content delta, concatenable in arrival order
    pub content: String,
    /// Whether this is the final fragment
    pub done: bool,
    /// Model name (usually only on the final fragment)
    pub model: Option<String>,
}

/// Type alias for a streamed generation response
pub type GenerationStream =
    Pin<Box<dyn Stream<Item = Result<GenerationChunk, ApplicationError>> + Send>>;

/// Port for text generation operations
///
/// The pipeline consumes the stream synchronously and fully before acting
/// on the text; there is no partial sanitization or playback downstream.
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Generate a streamed response with a specific system prompt
    ///
    /// Fragments arrive in generation order and concatenate into the full
    /// response; no reordering or deduplication happens anywhere.
    async fn generate_stream_with_system(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<GenerationStream, ApplicationError>;

    /// Check if the generation backend is reachable
    async fn is_healthy(&self) -> bool;

    /// Get the name of the configured model
    fn current_model(&self) -> &str;
}
