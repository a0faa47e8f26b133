pub mod dialogue;
pub mod domain;
pub mod error;
pub mod feedback;
pub mod insights;
pub mod orchestrator;
pub mod ports;
pub mod session;

#[cfg(test)]
mod test_support;

pub use domain::{FeedbackReport, Insights, ReportSource, Role, Score, Turn};
pub use error::{InterviewError, InterviewResult};
pub use feedback::FeedbackAggregator;
pub use orchestrator::{InterviewOrchestrator, OrchestratorSettings, APOLOGY, GREETING};
pub use ports::{
    ChatMessage, ChatRole, GenerationRequest, GenerationService, PortError, PortResult,
    SamplingParams,
};
pub use session::{InterviewSession, SessionStatus};
