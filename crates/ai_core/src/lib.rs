//! AI Core - Hosted text generation
//!
//! Provides abstractions for LLM generation against the hosted Gemini API,
//! which exposes `generateContent`/`streamGenerateContent` endpoints with
//! SSE streaming.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::GenerationConfig;
pub use error::GenerationError;
pub use gemini::GeminiGenerationEngine;
pub use ports::{GenerationEngine, GenerationRequest, StreamChunk, StreamingResponse};
