//! Application state shared across handlers

use std::sync::Arc;

use application::{TurnService, VoiceService, ports::TranscriptStorePort};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Turn pipeline for typed input
    pub turn_service: Arc<TurnService>,
    /// Speech front-end for recorded input
    pub voice_service: Arc<VoiceService>,
    /// Per-session transcript store
    pub transcript_store: Arc<dyn TranscriptStorePort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
