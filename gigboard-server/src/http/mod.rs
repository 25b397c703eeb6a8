//! HTTP server layer
//!
//! Axum server with:
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error and submission responses

pub mod server;
pub mod error;
pub mod extractors;
pub mod submission;
pub mod routes;

pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use error::ApiError;
pub use submission::{DeletionResponse, SubmissionResponse};
