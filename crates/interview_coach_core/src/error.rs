//! crates/interview_coach_core/src/error.rs
//!
//! The error type returned by the interview orchestration operations.

use crate::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    /// The caller supplied unusable input, such as a blank résumé.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The operation is not allowed in the session's current lifecycle stage.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The generation service failed or returned unusable content.
    #[error("Upstream failure: {0}")]
    UpstreamFailure(#[from] PortError),
}

/// A convenience type alias for `Result<T, InterviewError>`.
pub type InterviewResult<T> = Result<T, InterviewError>;
