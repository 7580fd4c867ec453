//! AI Speech - Speech-to-Text and Text-to-Speech
//!
//! Provides the speech provider ports and the Google web implementations:
//! the web speech API for recognition and the Translate TTS endpoint for
//! synthesis.

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::GoogleSpeechProvider;
pub use types::{AudioData, AudioFormat, Transcription};
