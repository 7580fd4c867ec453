//! Route definitions

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Session lifecycle (v1)
        .route("/v1/sessions", post(handlers::sessions::open_session))
        .route(
            "/v1/sessions/{id}",
            delete(handlers::sessions::close_session),
        )
        // Chat submissions (v1)
        .route("/v1/sessions/{id}/chat", post(handlers::chat::chat))
        .route("/v1/sessions/{id}/voice", post(handlers::voice::voice))
        // Transcript (v1)
        .route(
            "/v1/sessions/{id}/transcript",
            get(handlers::transcript::list_transcript)
                .delete(handlers::transcript::clear_transcript),
        )
        // Attach state
        .with_state(state)
}
