//! Streaming response handling for the Gemini SSE endpoint

use futures::stream::{self, StreamExt};
use reqwest::Response;
use serde::Deserialize;
use tracing::trace;

use crate::{
    error::GenerationError,
    ports::{StreamChunk, StreamingResponse},
};

/// One SSE payload from `streamGenerateContent?alt=sse`
#[derive(Debug, Deserialize)]
struct GeminiStreamEvent {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "modelVersion")]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

/// Create a streaming response from an SSE HTTP response
pub fn create_stream(response: Response) -> StreamingResponse {
    let byte_stream = response.bytes_stream();

    let chunk_stream = byte_stream
        .map(|result| match result {
            Ok(bytes) => parse_sse_chunks(&bytes),
            Err(e) => vec![Err(GenerationError::StreamError(e.to_string()))],
        })
        .flat_map(stream::iter);

    Box::pin(chunk_stream)
}

/// Parse `data:` lines of an SSE body fragment into stream chunks.
///
/// Each network read may carry zero or more complete events; the hosted API
/// terminates every event's JSON on a single line, so line-wise parsing is
/// sufficient.
fn parse_sse_chunks(bytes: &[u8]) -> Vec<Result<StreamChunk, GenerationError>> {
    let text = match std::str::from_utf8(bytes) {
        Ok(t) => t,
        Err(e) => {
            return vec![Err(GenerationError::InvalidResponse(format!(
                "Invalid UTF-8: {e}"
            )))];
        },
    };

    text.lines()
        .filter_map(|line| line.strip_prefix("data:").map(str::trim))
        .filter(|payload| !payload.is_empty() && *payload != "[DONE]")
        .map(|payload| {
            trace!(payload = %payload, "Parsing stream event");

            let event: GeminiStreamEvent = serde_json::from_str(payload)
                .map_err(|e| GenerationError::InvalidResponse(format!("JSON parse error: {e}")))?;

            Ok(chunk_from_event(&event))
        })
        .collect()
}

/// Flatten one event into a content delta
fn chunk_from_event(event: &GeminiStreamEvent) -> StreamChunk {
    let text: String = event
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
        .unwrap_or_default();

    let done = event
        .candidates
        .first()
        .is_some_and(|c| c.finish_reason.is_some());

    StreamChunk {
        text,
        done,
        model: if done {
            event.model_version.clone()
        } else {
            None
        },
    }
}
