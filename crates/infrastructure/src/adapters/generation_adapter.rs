//! Gemini generation adapter - Implements GenerationPort using ai_core

use ai_core::{GeminiGenerationEngine, GenerationConfig, GenerationEngine, GenerationRequest};
use application::{
    error::ApplicationError,
    ports::{GenerationChunk, GenerationPort, GenerationStream},
};
use async_trait::async_trait;
use futures::StreamExt;
use tracing::instrument;

/// Adapter for the hosted Gemini generation API
#[derive(Debug)]
pub struct GeminiGenerationAdapter {
    engine: GeminiGenerationEngine,
}

impl GeminiGenerationAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// Fails when the API key is missing; the caller treats this as a fatal
    /// startup error.
    pub fn new(config: GenerationConfig) -> Result<Self, ApplicationError> {
        let engine = GeminiGenerationEngine::new(config).map_err(Self::map_error)?;
        Ok(Self { engine })
    }

    /// Convert ai_core error to application error
    fn map_error(e: ai_core::GenerationError) -> ApplicationError {
        match e {
            ai_core::GenerationError::RateLimited => ApplicationError::RateLimited,
            ai_core::GenerationError::MissingApiKey => {
                ApplicationError::Configuration("generation API key not configured".to_string())
            },
            other => ApplicationError::Generation(other.to_string()),
        }
    }
}

#[async_trait]
impl GenerationPort for GeminiGenerationAdapter {
    #[instrument(skip(self, system_prompt, message), fields(message_len = message.len()))]
    async fn generate_stream_with_system(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<GenerationStream, ApplicationError> {
        let request = GenerationRequest::with_system(system_prompt, message);

        let stream = self
            .engine
            .generate_stream(request)
            .await
            .map_err(Self::map_error)?;

        let mapped = stream.map(|chunk| {
            chunk
                .map(|c| GenerationChunk {
                    content: c.text,
                    done: c.done,
                    model: c.model,
                })
                .map_err(Self::map_error)
        });

        Ok(Box::pin(mapped))
    }

    async fn is_healthy(&self) -> bool {
        self.engine.check_availability().await.unwrap_or(false)
    }

    fn current_model(&self) -> &str {
        self.engine.default_model()
    }
}
