//! crates/interview_coach_core/src/orchestrator.rs
//!
//! The caller-facing operations of an interview: submit a résumé, exchange turns
//! with the interviewer, and end the session with a feedback report.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::dialogue;
use crate::domain::FeedbackReport;
use crate::error::{InterviewError, InterviewResult};
use crate::feedback::FeedbackAggregator;
use crate::ports::{GenerationService, PortError, SamplingParams};
use crate::session::InterviewSession;

/// The interviewer's opening line, appended as the first turn of every session.
pub const GREETING: &str = "Hello! I'm your AI interview coach. I've reviewed your résumé and I'm ready to conduct a realistic interview. Let's start with a classic question: Can you tell me about yourself and your professional background?";

/// Returned (and recorded) as the interviewer's reply when a turn cannot be generated.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorSettings {
    pub dialogue: SamplingParams,
    pub feedback: SamplingParams,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            dialogue: SamplingParams::DIALOGUE,
            feedback: SamplingParams::FEEDBACK,
        }
    }
}

/// Drives interviews against an interviewer and an evaluator generation service.
///
/// Holds no per-session state; each call operates on the session it is given.
#[derive(Clone)]
pub struct InterviewOrchestrator {
    interviewer: Arc<dyn GenerationService>,
    aggregator: FeedbackAggregator,
    settings: OrchestratorSettings,
}

impl InterviewOrchestrator {
    pub fn new(
        interviewer: Arc<dyn GenerationService>,
        evaluator: Arc<dyn GenerationService>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            interviewer,
            aggregator: FeedbackAggregator::new(evaluator, settings.feedback),
            settings,
        }
    }

    /// Starts a session for the résumé and opens it with the greeting.
    /// The derived insights are available through `InterviewSession::insights`.
    pub fn submit_resume(&self, resume: impl Into<String>) -> InterviewResult<InterviewSession> {
        let mut session = InterviewSession::start(resume)?;
        session.append_interviewer_turn(GREETING)?;
        Ok(session)
    }

    /// Sends the candidate's answer and returns the interviewer's reply.
    ///
    /// A failed generation call or a blank reply does not fail the turn: the
    /// apology is recorded as the reply and the session stays active.
    pub async fn send_turn(
        &self,
        session: &mut InterviewSession,
        candidate_text: &str,
    ) -> InterviewResult<String> {
        session.ensure_active()?;
        if candidate_text.trim().is_empty() {
            return Err(InterviewError::InvalidInput(
                "The candidate's answer is empty.".to_string(),
            ));
        }

        let request =
            dialogue::build_request(session.resume(), session.transcript(), candidate_text)
                .into_request(self.settings.dialogue);

        let llm_start = Instant::now();
        let generated = self
            .interviewer
            .generate(&request)
            .await
            .and_then(|text| match text.trim() {
                "" => Err(PortError::EmptyResponse),
                trimmed => Ok(trimmed.to_string()),
            });
        let reply = match generated {
            Ok(text) => {
                info!(
                    session_id = %session.id(),
                    "⏱️ Interviewer reply took: {:?}",
                    llm_start.elapsed()
                );
                text
            }
            Err(e) => {
                let failure = InterviewError::UpstreamFailure(e);
                warn!(session_id = %session.id(), "Interview turn degraded: {}", failure);
                APOLOGY.to_string()
            }
        };

        session.append_candidate_turn(candidate_text)?;
        session.append_interviewer_turn(reply.clone())?;
        Ok(reply)
    }

    /// Ends the session and produces its feedback report.
    ///
    /// The report is generated once; repeated calls return the recorded report.
    pub async fn end_session(
        &self,
        session: &mut InterviewSession,
    ) -> InterviewResult<FeedbackReport> {
        if let Some(report) = session.report() {
            return Ok(report.clone());
        }

        let (transcript, resume) = session.end();
        let report = self.aggregator.generate_report(resume, transcript).await?;
        if report.is_fallback() {
            warn!(session_id = %session.id(), "Returning fallback feedback report.");
        }
        Ok(session.record_report(report)?.clone())
    }
}
