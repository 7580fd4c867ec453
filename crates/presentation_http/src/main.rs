//! Chatterbox HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{TurnService, VoiceService, ports::SpeechPort, ports::TranscriptStorePort, prompt};
use infrastructure::{
    AppConfig, GeminiGenerationAdapter, GoogleSpeechAdapter, InMemoryTranscriptStore,
};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatterbox_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🎤 Chatterbox v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    // The one fatal startup check: no generation key, no service.
    if let Err(e) = config.validate() {
        error!("{e}");
        anyhow::bail!("configuration invalid: {e}");
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.generation.model,
        "Configuration loaded"
    );

    // Initialize provider adapters
    let generation = GeminiGenerationAdapter::new(config.generation.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize generation: {e}"))?;
    let generation: Arc<dyn application::ports::GenerationPort> = Arc::new(generation);

    // Capability probe happens once, here.
    let speech = GoogleSpeechAdapter::connect(config.speech.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize speech: {e}"))?;
    let speech: Arc<dyn SpeechPort> = Arc::new(speech);

    // Session-scoped transcript store
    let transcript_store: Arc<dyn TranscriptStorePort> = Arc::new(InMemoryTranscriptStore::new());

    // Initialize services
    let system_prompt = config
        .pipeline
        .system_prompt
        .clone()
        .unwrap_or_else(|| prompt::ASSISTANT_INSTRUCTIONS.to_string());

    let turn_service = Arc::new(TurnService::with_system_prompt(
        Arc::clone(&generation),
        Arc::clone(&speech),
        Arc::clone(&transcript_store),
        system_prompt,
    ));
    let voice_service = Arc::new(VoiceService::new(
        Arc::clone(&speech),
        Arc::clone(&turn_service),
    ));

    // Create app state
    let state = AppState {
        turn_service,
        voice_service,
        transcript_store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any)
    };

    // Add middleware (order matters: first added = outermost)
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        // Voice uploads are the largest bodies the API accepts.
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_audio_bytes,
        ));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    // Graceful shutdown configuration
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }

    info!(
        "Draining in-flight requests (up to {}s)",
        timeout.as_secs()
    );
}
