//! Infrastructure layer for Chatterbox
//!
//! Adapters binding the provider crates to the application ports, the
//! in-memory transcript store, and application configuration.

pub mod adapters;
pub mod config;
pub mod store;

pub use adapters::{GeminiGenerationAdapter, GoogleSpeechAdapter};
pub use config::{AppConfig, PipelineConfig, ServerConfig};
pub use store::InMemoryTranscriptStore;
