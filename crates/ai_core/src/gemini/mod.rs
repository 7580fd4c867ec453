//! Gemini API generation engine
//!
//! Connects to the hosted Gemini `generateContent` family of endpoints and
//! exposes the SSE streaming variant through the engine port.

mod client;
mod streaming;

pub use client::GeminiGenerationEngine;
