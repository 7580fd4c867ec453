//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod generation_port;
mod speech_port;
mod transcript_store;

pub use generation_port::{GenerationChunk, GenerationPort, GenerationStream};
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::{Capability, SpeechPort, SynthesisResult, TranscriptionResult};
#[cfg(test)]
pub use transcript_store::MockTranscriptStorePort;
pub use transcript_store::TranscriptStorePort;
