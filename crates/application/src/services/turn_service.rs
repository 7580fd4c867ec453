//! Turn service - the conversation turn pipeline
//!
//! One accepted user input runs the full pipeline to completion: append the
//! user turn, generate, sanitize, synthesize, append the assistant turn.
//! A per-session lock keeps pipeline runs from overlapping within a session;
//! separate sessions share nothing and may proceed concurrently.

use std::{collections::HashMap, fmt, sync::Arc, time::Instant};

use domain::{SessionId, Turn, TurnMetadata};
use futures::StreamExt;
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{Capability, GenerationPort, SpeechPort, TranscriptStorePort},
    prompt,
    sanitizer::sanitize_for_speech,
};

/// Service running the turn pipeline for a session
pub struct TurnService {
    generation: Arc<dyn GenerationPort>,
    speech: Arc<dyn SpeechPort>,
    store: Arc<dyn TranscriptStorePort>,
    system_prompt: String,
    session_locks: Mutex<HashMap<SessionId, Arc<tokio::sync::Mutex<()>>>>,
}

impl fmt::Debug for TurnService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnService")
            .field("system_prompt", &self.system_prompt)
            .finish_non_exhaustive()
    }
}

impl TurnService {
    /// Create a new turn service with the fixed assistant instructions
    pub fn new(
        generation: Arc<dyn GenerationPort>,
        speech: Arc<dyn SpeechPort>,
        store: Arc<dyn TranscriptStorePort>,
    ) -> Self {
        Self::with_system_prompt(generation, speech, store, prompt::ASSISTANT_INSTRUCTIONS)
    }

    /// Create a turn service with a custom instruction template
    pub fn with_system_prompt(
        generation: Arc<dyn GenerationPort>,
        speech: Arc<dyn SpeechPort>,
        store: Arc<dyn TranscriptStorePort>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            generation,
            speech,
            store,
            system_prompt: system_prompt.into(),
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Run the pipeline for one typed (or already transcribed) user input.
    ///
    /// Empty or whitespace-only input is a no-op: nothing is appended and
    /// `None` is returned. Otherwise exactly one user turn and one assistant
    /// turn are appended, and the assistant turn is returned. Generation and
    /// synthesis failures degrade the turn instead of erroring; only an
    /// unknown session propagates.
    #[instrument(skip(self, raw_input), fields(session = %session, input_len = raw_input.len()))]
    pub async fn process_text(
        &self,
        session: &SessionId,
        raw_input: &str,
    ) -> Result<Option<Turn>, ApplicationError> {
        let input = raw_input.trim();
        if input.is_empty() {
            debug!("Ignoring empty input");
            return Ok(None);
        }

        let lock = self.session_lock(session);
        let _running = lock.lock().await;

        self.store.append(session, Turn::user(input)).await?;

        let start = Instant::now();
        let (response, model) = self.generate(input).await;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        let content = sanitize_for_speech(&response);

        let mut turn = Turn::assistant(&content).with_metadata(TurnMetadata {
            model,
            latency_ms: Some(latency_ms),
        });

        if let Some(audio) = self.synthesize(&content).await {
            turn = turn.with_audio(audio);
        }

        self.store.append(session, turn.clone()).await?;

        info!(
            latency_ms,
            has_audio = turn.has_audio(),
            response_len = turn.content.len(),
            "Turn complete"
        );

        Ok(Some(turn))
    }

    /// Drop the pipeline lock for a closed session
    pub fn forget_session(&self, session: &SessionId) {
        self.session_locks.lock().remove(session);
    }

    /// Check if the generation backend is reachable
    pub async fn is_healthy(&self) -> bool {
        self.generation.is_healthy().await
    }

    /// Get the configured model name
    pub fn current_model(&self) -> &str {
        self.generation.current_model()
    }

    /// Generate the full response text for a user message.
    ///
    /// Streamed fragments are concatenated in arrival order. Any failure -
    /// on the initial call or mid-stream - substitutes the fixed fallback
    /// sentence as the whole response; the user always gets an assistant
    /// turn for accepted input.
    async fn generate(&self, input: &str) -> (String, Option<String>) {
        let stream = match self
            .generation
            .generate_stream_with_system(&self.system_prompt, input)
            .await
        {
            Ok(stream) => stream,
            Err(e) => {
                warn!(error = %e, "Generation call failed, using fallback response");
                return (prompt::GENERATION_FALLBACK.to_string(), None);
            },
        };

        let mut response = String::new();
        let mut model = None;
        let mut stream = stream;

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(chunk) => {
                    response.push_str(&chunk.content);
                    if chunk.model.is_some() {
                        model = chunk.model;
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Generation stream failed, using fallback response");
                    return (prompt::GENERATION_FALLBACK.to_string(), None);
                },
            }
        }

        (response, model)
    }

    /// Synthesize speech for sanitized text, degrading to no audio.
    async fn synthesize(&self, content: &str) -> Option<Vec<u8>> {
        if content.is_empty() {
            return None;
        }

        match self.speech.synthesis_capability() {
            Capability::Available => {},
            Capability::Unavailable { reason } => {
                debug!(reason = %reason, "Synthesis unavailable, turn will be text only");
                return None;
            },
        }

        match self.speech.synthesize(content.to_string()).await {
            Ok(result) => Some(result.audio),
            Err(e) => {
                warn!(error = %e, "Synthesis failed, turn will be text only");
                None
            },
        }
    }

    fn session_lock(&self, session: &SessionId) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(
            self.session_locks
                .lock()
                .entry(*session)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use domain::TurnRole;
    use futures::stream;
    use mockall::mock;

    use super::*;
    use crate::ports::{
        Capability, GenerationChunk, GenerationStream, MockSpeechPort, MockTranscriptStorePort,
        SynthesisResult,
    };

    mock! {
        pub GenerationEngine {}

        #[async_trait]
        impl GenerationPort for GenerationEngine {
            async fn generate_stream_with_system(
                &self,
                system_prompt: &str,
                message: &str,
            ) -> Result<GenerationStream, ApplicationError>;
            async fn is_healthy(&self) -> bool;
            fn current_model(&self) -> &str;
        }
    }

    fn chunked_stream(parts: &[&str]) -> GenerationStream {
        let mut chunks: Vec<Result<GenerationChunk, ApplicationError>> = parts
            .iter()
            .map(|part| {
                Ok(GenerationChunk {
                    content: (*part).to_string(),
                    done: false,
                    model: None,
                })
            })
            .collect();
        chunks.push(Ok(GenerationChunk {
            content: String::new(),
            done: true,
            model: Some("test-model".to_string()),
        }));
        Box::pin(stream::iter(chunks))
    }

    fn failing_stream() -> GenerationStream {
        Box::pin(stream::iter(vec![
            Ok(GenerationChunk {
                content: "partial".to_string(),
                done: false,
                model: None,
            }),
            Err(ApplicationError::Generation("connection reset".to_string())),
        ]))
    }

    fn speech_available() -> MockSpeechPort {
        let mut mock = MockSpeechPort::new();
        mock.expect_synthesis_capability()
            .returning(|| Capability::Available);
        mock.expect_synthesize().returning(|_| {
            Ok(SynthesisResult {
                audio: vec![1, 2, 3],
                mime_type: "audio/mpeg",
            })
        });
        mock
    }

    /// In-memory store mock that records appended turns for assertions.
    fn recording_store() -> (MockTranscriptStorePort, Arc<Mutex<Vec<Turn>>>) {
        let turns = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&turns);

        let mut mock = MockTranscriptStorePort::new();
        mock.expect_append().returning(move |_, turn| {
            recorded.lock().push(turn);
            Ok(())
        });
        (mock, turns)
    }

    fn service(
        generation: MockGenerationEngine,
        speech: MockSpeechPort,
        store: MockTranscriptStorePort,
    ) -> TurnService {
        TurnService::new(Arc::new(generation), Arc::new(speech), Arc::new(store))
    }

    #[tokio::test]
    async fn empty_input_appends_nothing() {
        let generation = MockGenerationEngine::new();
        let speech = MockSpeechPort::new();
        let (store, turns) = recording_store();

        let service = service(generation, speech, store);
        let result = service
            .process_text(&SessionId::new(), "   \n\t  ")
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(turns.lock().is_empty());
    }

    #[tokio::test]
    async fn accepted_input_appends_user_then_assistant() {
        let mut generation = MockGenerationEngine::new();
        generation
            .expect_generate_stream_with_system()
            .returning(|_, _| Ok(chunked_stream(&["Hello", " there", "!"])));

        let (store, turns) = recording_store();
        let service = service(generation, speech_available(), store);

        let assistant = service
            .process_text(&SessionId::new(), "Hi")
            .await
            .unwrap()
            .unwrap();

        let turns = turns.lock();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[0].content, "Hi");
        assert_eq!(turns[1].role, TurnRole::Assistant);
        assert_eq!(assistant.content, "Hello there!");
    }

    #[tokio::test]
    async fn fragments_concatenate_in_arrival_order() {
        let mut generation = MockGenerationEngine::new();
        generation
            .expect_generate_stream_with_system()
            .returning(|_, _| Ok(chunked_stream(&["c", "b", "a"])));

        let (store, _) = recording_store();
        let service = service(generation, speech_available(), store);

        let assistant = service
            .process_text(&SessionId::new(), "order test")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(assistant.content, "cba");
    }

    #[tokio::test]
    async fn response_is_sanitized_before_append() {
        let mut generation = MockGenerationEngine::new();
        generation
            .expect_generate_stream_with_system()
            .returning(|_, _| Ok(chunked_stream(&["**Paris** is   the", " capital. 😀"])));

        let (store, _) = recording_store();
        let service = service(generation, speech_available(), store);

        let assistant = service
            .process_text(&SessionId::new(), "capital of France?")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(assistant.content, "Paris is the capital.");
    }

    #[tokio::test]
    async fn generation_call_failure_substitutes_fallback() {
        let mut generation = MockGenerationEngine::new();
        generation
            .expect_generate_stream_with_system()
            .returning(|_, _| Err(ApplicationError::Generation("boom".to_string())));

        let (store, turns) = recording_store();
        let service = service(generation, speech_available(), store);

        let assistant = service
            .process_text(&SessionId::new(), "Hi")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(assistant.content, prompt::GENERATION_FALLBACK);
        assert!(assistant.has_audio());
        assert_eq!(turns.lock().len(), 2);
    }

    #[tokio::test]
    async fn mid_stream_failure_discards_partial_response() {
        let mut generation = MockGenerationEngine::new();
        generation
            .expect_generate_stream_with_system()
            .returning(|_, _| Ok(failing_stream()));

        let (store, _) = recording_store();
        let service = service(generation, speech_available(), store);

        let assistant = service
            .process_text(&SessionId::new(), "Hi")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(assistant.content, prompt::GENERATION_FALLBACK);
        assert!(!assistant.content.contains("partial"));
    }

    #[tokio::test]
    async fn synthesis_failure_yields_text_only_turn() {
        let mut generation = MockGenerationEngine::new();
        generation
            .expect_generate_stream_with_system()
            .returning(|_, _| Ok(chunked_stream(&["Answer"])));

        let mut speech = MockSpeechPort::new();
        speech
            .expect_synthesis_capability()
            .returning(|| Capability::Available);
        speech
            .expect_synthesize()
            .returning(|_| Err(ApplicationError::Synthesis("tts down".to_string())));

        let (store, turns) = recording_store();
        let service = service(generation, speech, store);

        let assistant = service
            .process_text(&SessionId::new(), "Hi")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(assistant.content, "Answer");
        assert!(!assistant.has_audio());
        assert_eq!(turns.lock().len(), 2);
    }

    #[tokio::test]
    async fn unavailable_synthesis_is_never_called() {
        let mut generation = MockGenerationEngine::new();
        generation
            .expect_generate_stream_with_system()
            .returning(|_, _| Ok(chunked_stream(&["Answer"])));

        let mut speech = MockSpeechPort::new();
        speech
            .expect_synthesis_capability()
            .returning(|| Capability::unavailable("not configured"));
        // No expect_synthesize: a call would panic the mock.

        let (store, _) = recording_store();
        let service = service(generation, speech, store);

        let assistant = service
            .process_text(&SessionId::new(), "Hi")
            .await
            .unwrap()
            .unwrap();

        assert!(!assistant.has_audio());
    }

    #[tokio::test]
    async fn assistant_turn_carries_model_metadata() {
        let mut generation = MockGenerationEngine::new();
        generation
            .expect_generate_stream_with_system()
            .returning(|_, _| Ok(chunked_stream(&["Answer"])));

        let (store, _) = recording_store();
        let service = service(generation, speech_available(), store);

        let assistant = service
            .process_text(&SessionId::new(), "Hi")
            .await
            .unwrap()
            .unwrap();

        let metadata = assistant.metadata.unwrap();
        assert_eq!(metadata.model.as_deref(), Some("test-model"));
        assert!(metadata.latency_ms.is_some());
    }

    #[tokio::test]
    async fn submissions_alternate_user_assistant() {
        let mut generation = MockGenerationEngine::new();
        generation
            .expect_generate_stream_with_system()
            .returning(|_, _| Ok(chunked_stream(&["reply"])));

        let (store, turns) = recording_store();
        let service = service(generation, speech_available(), store);
        let session = SessionId::new();

        for i in 0..4 {
            service
                .process_text(&session, &format!("question {i}"))
                .await
                .unwrap();
        }

        let turns = turns.lock();
        assert_eq!(turns.len(), 8);
        for (i, turn) in turns.iter().enumerate() {
            let expected = if i % 2 == 0 {
                TurnRole::User
            } else {
                TurnRole::Assistant
            };
            assert_eq!(turn.role, expected, "turn {i}");
        }
    }

    #[tokio::test]
    async fn unknown_session_propagates() {
        let generation = MockGenerationEngine::new();
        let speech = MockSpeechPort::new();

        let mut store = MockTranscriptStorePort::new();
        store.expect_append().returning(|session, _| {
            Err(ApplicationError::UnknownSession(session.to_string()))
        });

        let service = service(generation, speech, store);
        let result = service.process_text(&SessionId::new(), "Hi").await;

        assert!(matches!(result, Err(ApplicationError::UnknownSession(_))));
    }

    #[test]
    fn forget_session_drops_the_lock() {
        let generation = MockGenerationEngine::new();
        let speech = MockSpeechPort::new();
        let (store, _) = recording_store();
        let service = service(generation, speech, store);

        let session = SessionId::new();
        let _lock = service.session_lock(&session);
        assert_eq!(service.session_locks.lock().len(), 1);

        service.forget_session(&session);
        assert!(service.session_locks.lock().is_empty());
    }
}
