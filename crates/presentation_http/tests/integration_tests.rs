//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::sync::Arc;

use application::{
    ApplicationError, TurnService, VoiceService,
    ports::{
        Capability, GenerationChunk, GenerationPort, GenerationStream, SpeechPort,
        SynthesisResult, TranscriptStorePort, TranscriptionResult,
    },
};
use async_trait::async_trait;
use axum_test::TestServer;
use futures::stream;
use infrastructure::{AppConfig, InMemoryTranscriptStore};
use presentation_http::{routes::create_router, state::AppState};
use serde_json::{Value, json};

/// Mock generation engine for testing
struct MockGeneration {
    healthy: bool,
}

#[async_trait]
impl GenerationPort for MockGeneration {
    async fn generate_stream_with_system(
        &self,
        _system_prompt: &str,
        message: &str,
    ) -> Result<GenerationStream, ApplicationError> {
        let chunks = vec![
            Ok(GenerationChunk {
                content: format!("Reply to {message}"),
                done: false,
                model: None,
            }),
            Ok(GenerationChunk {
                content: String::new(),
                done: true,
                model: Some("mock-model".to_string()),
            }),
        ];
        Ok(Box::pin(stream::iter(chunks)))
    }

    async fn is_healthy(&self) -> bool {
        self.healthy
    }

    fn current_model(&self) -> &str {
        "mock-model"
    }
}

/// Mock speech provider for testing
struct MockSpeech;

#[async_trait]
impl SpeechPort for MockSpeech {
    async fn transcribe(
        &self,
        _audio: Vec<u8>,
        _mime_type: String,
    ) -> Result<TranscriptionResult, ApplicationError> {
        Ok(TranscriptionResult {
            text: "spoken question".to_string(),
            confidence: Some(0.9),
        })
    }

    async fn synthesize(&self, _text: String) -> Result<SynthesisResult, ApplicationError> {
        Ok(SynthesisResult {
            audio: vec![0xFF, 0xF3, 0x00],
            mime_type: "audio/mpeg",
        })
    }

    fn recognition_capability(&self) -> Capability {
        Capability::Available
    }

    fn synthesis_capability(&self) -> Capability {
        Capability::Available
    }
}

fn test_server(healthy: bool) -> TestServer {
    let generation: Arc<dyn GenerationPort> = Arc::new(MockGeneration { healthy });
    let speech: Arc<dyn SpeechPort> = Arc::new(MockSpeech);
    let transcript_store: Arc<dyn TranscriptStorePort> = Arc::new(InMemoryTranscriptStore::new());

    let turn_service = Arc::new(TurnService::new(
        generation,
        Arc::clone(&speech),
        Arc::clone(&transcript_store),
    ));
    let voice_service = Arc::new(VoiceService::new(speech, Arc::clone(&turn_service)));

    let state = AppState {
        turn_service,
        voice_service,
        transcript_store,
        config: Arc::new(AppConfig::default()),
    };

    TestServer::new(create_router(state)).expect("failed to start test server")
}

async fn open_session(server: &TestServer) -> String {
    let response = server.post("/v1/sessions").await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["session_id"]
        .as_str()
        .expect("session_id missing")
        .to_string()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let server = test_server(true);

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn ready_reflects_generation_health() {
    let server = test_server(true);
    server.get("/ready").await.assert_status_ok();

    let unhealthy = test_server(false);
    unhealthy
        .get("/ready")
        .await
        .assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn open_session_returns_an_id() {
    let server = test_server(true);
    let session_id = open_session(&server).await;
    assert!(!session_id.is_empty());
}

#[tokio::test]
async fn close_session_invalidates_it() {
    let server = test_server(true);
    let session_id = open_session(&server).await;

    server
        .delete(&format!("/v1/sessions/{session_id}"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    server
        .post(&format!("/v1/sessions/{session_id}/chat"))
        .json(&json!({"message": "hello"}))
        .await
        .assert_status_not_found();
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn chat_returns_the_assistant_reply() {
    let server = test_server(true);
    let session_id = open_session(&server).await;

    let response = server
        .post(&format!("/v1/sessions/{session_id}/chat"))
        .json(&json!({"message": "hello"}))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["reply"]["content"], "Reply to hello");
    assert_eq!(body["reply"]["model"], "mock-model");
    // MP3 bytes arrive base64 encoded.
    assert!(body["reply"]["audio"].as_str().is_some());
}

#[tokio::test]
async fn empty_message_is_rejected_without_touching_the_transcript() {
    let server = test_server(true);
    let session_id = open_session(&server).await;

    server
        .post(&format!("/v1/sessions/{session_id}/chat"))
        .json(&json!({"message": "   "}))
        .await
        .assert_status_bad_request();

    let transcript = server
        .get(&format!("/v1/sessions/{session_id}/transcript"))
        .await
        .json::<Value>();
    assert_eq!(transcript["turns"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn chat_on_unknown_session_is_404() {
    let server = test_server(true);

    server
        .post(&format!("/v1/sessions/{}/chat", uuid::Uuid::new_v4()))
        .json(&json!({"message": "hello"}))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn chat_with_malformed_session_id_is_400() {
    let server = test_server(true);

    server
        .post("/v1/sessions/not-a-uuid/chat")
        .json(&json!({"message": "hello"}))
        .await
        .assert_status_bad_request();
}

// =============================================================================
// Voice
// =============================================================================

#[tokio::test]
async fn voice_submission_transcribes_and_replies() {
    let server = test_server(true);
    let session_id = open_session(&server).await;

    let response = server
        .post(&format!("/v1/sessions/{session_id}/voice"))
        .content_type("audio/wav")
        .bytes(vec![1u8, 2, 3, 4].into())
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["transcription"], "spoken question");
    assert_eq!(body["reply"]["content"], "Reply to spoken question");
}

#[tokio::test]
async fn voice_without_audio_content_type_is_rejected() {
    let server = test_server(true);
    let session_id = open_session(&server).await;

    server
        .post(&format!("/v1/sessions/{session_id}/voice"))
        .content_type("application/json")
        .bytes(vec![1u8, 2, 3].into())
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn voice_with_empty_body_is_rejected() {
    let server = test_server(true);
    let session_id = open_session(&server).await;

    server
        .post(&format!("/v1/sessions/{session_id}/voice"))
        .content_type("audio/wav")
        .await
        .assert_status_bad_request();
}

// =============================================================================
// Transcript
// =============================================================================

#[tokio::test]
async fn transcript_lists_turns_in_conversation_order() {
    let server = test_server(true);
    let session_id = open_session(&server).await;

    for message in ["first", "second"] {
        server
            .post(&format!("/v1/sessions/{session_id}/chat"))
            .json(&json!({"message": message}))
            .await
            .assert_status_ok();
    }

    let body = server
        .get(&format!("/v1/sessions/{session_id}/transcript"))
        .await
        .json::<Value>();

    let turns = body["turns"].as_array().unwrap();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[0]["role"], "user");
    assert_eq!(turns[0]["content"], "first");
    assert_eq!(turns[1]["role"], "assistant");
    assert_eq!(turns[2]["content"], "second");
    assert_eq!(turns[3]["role"], "assistant");
}

#[tokio::test]
async fn clearing_the_transcript_empties_it() {
    let server = test_server(true);
    let session_id = open_session(&server).await;

    server
        .post(&format!("/v1/sessions/{session_id}/chat"))
        .json(&json!({"message": "hello"}))
        .await
        .assert_status_ok();

    let cleared = server
        .delete(&format!("/v1/sessions/{session_id}/transcript"))
        .await;
    cleared.assert_status_ok();
    assert_eq!(cleared.json::<Value>()["turns"].as_array().unwrap().len(), 0);

    let listed = server
        .get(&format!("/v1/sessions/{session_id}/transcript"))
        .await
        .json::<Value>();
    assert_eq!(listed["turns"].as_array().unwrap().len(), 0);
}
