//! Application services - Use case implementations

mod turn_service;
mod voice_service;

pub use turn_service::TurnService;
pub use voice_service::{VoiceService, VoiceTurnOutcome};
