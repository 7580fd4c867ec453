//! Infrastructure adapters implementing application ports

mod generation_adapter;
mod speech_adapter;

pub use generation_adapter::GeminiGenerationAdapter;
pub use speech_adapter::GoogleSpeechAdapter;
