//! services/api/src/error.rs
//!
//! Defines the primary error type for the API service, and the mapping of core
//! interview errors onto HTTP responses.

use crate::config::ConfigError;
use axum::http::StatusCode;
use interview_coach_core::InterviewError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Maps an orchestration error to the status and message returned by handlers.
pub fn interview_error_response(error: InterviewError) -> (StatusCode, String) {
    match error {
        InterviewError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        InterviewError::InvalidState(msg) => (StatusCode::CONFLICT, msg),
        InterviewError::UpstreamFailure(e) => {
            tracing::error!("Generation service failure: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                "The interviewer is unavailable right now.".to_string(),
            )
        }
    }
}
