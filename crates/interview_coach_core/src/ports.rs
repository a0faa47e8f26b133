//! crates/interview_coach_core/src/ports.rs
//!
//! Defines the service contract (trait) for the external text-generation service.
//! This trait forms the boundary of the hexagonal architecture, allowing the core
//! to be independent of any specific LLM provider.

use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, provider SDK).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("The request could not be built: {0}")]
    InvalidRequest(String),
    #[error("The generation service failed: {0}")]
    Upstream(String),
    #[error("The generation service returned no text")]
    EmptyResponse,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Request Types
//=========================================================================================

/// The role of a message as understood by chat-style generation services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling settings that bound a single generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl SamplingParams {
    /// Defaults for interviewer replies: short, one question at a time.
    pub const DIALOGUE: SamplingParams = SamplingParams {
        temperature: 0.7,
        max_output_tokens: 200,
    };

    /// Defaults for the end-of-interview evaluation.
    pub const FEEDBACK: SamplingParams = SamplingParams {
        temperature: 0.7,
        max_output_tokens: 500,
    };
}

/// Everything the generation service needs to produce one reply.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instructions: String,
    pub messages: Vec<ChatMessage>,
    pub sampling: SamplingParams,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generates a plain-text reply for the given instructions and message history.
    async fn generate(&self, request: &GenerationRequest) -> PortResult<String>;
}
