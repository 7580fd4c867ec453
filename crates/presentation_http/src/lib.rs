//! Chatterbox HTTP presentation layer
//!
//! This crate provides the HTTP API: sessions, typed and spoken chat
//! submissions, transcript listing and clearing, and health probes.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
