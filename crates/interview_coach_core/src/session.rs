//! crates/interview_coach_core/src/session.rs
//!
//! Holds the state of a single interview: the résumé, the insights derived from it,
//! and the append-only transcript.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::{FeedbackReport, Insights, Role, Turn};
use crate::error::{InterviewError, InterviewResult};
use crate::insights;

/// Lifecycle stage of a session. Discarding consumes the session value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Ended,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Ended => "ended",
        }
    }
}

/// The explicit context object for one interview.
///
/// This is the only writer of its transcript; other components see it as a slice.
#[derive(Debug)]
pub struct InterviewSession {
    id: Uuid,
    resume: String,
    insights: Insights,
    transcript: Vec<Turn>,
    status: SessionStatus,
    created_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    report: Option<FeedbackReport>,
}

impl InterviewSession {
    /// Starts a session for a résumé, deriving its insights once.
    pub fn start(resume: impl Into<String>) -> InterviewResult<Self> {
        let resume = resume.into();
        if resume.trim().is_empty() {
            return Err(InterviewError::InvalidInput(
                "A résumé is required to start an interview.".to_string(),
            ));
        }

        let insights = insights::extract(&resume);
        let session = Self {
            id: Uuid::new_v4(),
            resume,
            insights,
            transcript: Vec::new(),
            status: SessionStatus::Active,
            created_at: Utc::now(),
            ended_at: None,
            report: None,
        };
        info!(session_id = %session.id, "Interview session started.");
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn resume(&self) -> &str {
        &self.resume
    }

    pub fn insights(&self) -> &Insights {
        &self.insights
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_ended(&self) -> bool {
        self.status == SessionStatus::Ended
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn append_candidate_turn(&mut self, text: impl Into<String>) -> InterviewResult<()> {
        self.append(Role::Candidate, text.into())
    }

    pub fn append_interviewer_turn(&mut self, text: impl Into<String>) -> InterviewResult<()> {
        self.append(Role::Interviewer, text.into())
    }

    fn append(&mut self, role: Role, content: String) -> InterviewResult<()> {
        self.ensure_active()?;
        self.transcript.push(Turn::new(role, content));
        Ok(())
    }

    /// Fails with `InvalidState` once the session has ended.
    pub fn ensure_active(&self) -> InterviewResult<()> {
        match self.status {
            SessionStatus::Active => Ok(()),
            SessionStatus::Ended => Err(InterviewError::InvalidState(format!(
                "Interview session {} has already ended.",
                self.id
            ))),
        }
    }

    /// Freezes the transcript and returns it with the résumé.
    ///
    /// Only the first call transitions the session; later calls return the same
    /// frozen transcript without side effects.
    pub fn end(&mut self) -> (&[Turn], &str) {
        if self.status == SessionStatus::Active {
            self.status = SessionStatus::Ended;
            self.ended_at = Some(Utc::now());
            info!(
                session_id = %self.id,
                turns = self.transcript.len(),
                "Interview session ended."
            );
        }
        (&self.transcript, &self.resume)
    }

    /// The report produced for this session, if one has been recorded.
    pub fn report(&self) -> Option<&FeedbackReport> {
        self.report.as_ref()
    }

    /// Stores the report for an ended session. A session keeps its first report.
    pub fn record_report(&mut self, report: FeedbackReport) -> InterviewResult<&FeedbackReport> {
        if !self.is_ended() {
            return Err(InterviewError::InvalidState(format!(
                "Interview session {} must end before a report is recorded.",
                self.id
            )));
        }
        Ok(self.report.get_or_insert(report))
    }

    /// Drops the session for good. Starting over requires a new session.
    pub fn discard(self) {
        info!(session_id = %self.id, "Interview session discarded.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReportSource;

    fn active_session() -> InterviewSession {
        InterviewSession::start("5 years Python and AWS, led a team of 4").unwrap()
    }

    #[test]
    fn test_start_rejects_blank_resume() {
        for resume in ["", "   ", "\n\t "] {
            let err = InterviewSession::start(resume).unwrap_err();
            assert!(matches!(err, InterviewError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_start_derives_insights() {
        let session = active_session();
        assert_eq!(session.status(), SessionStatus::Active);
        assert!(session.transcript().is_empty());
        assert_eq!(session.insights().keywords, vec!["Python", "AWS"]);
    }

    #[test]
    fn test_turns_are_kept_in_order() {
        let mut session = active_session();
        session.append_interviewer_turn("Tell me about yourself.").unwrap();
        session.append_candidate_turn("I lead a data team.").unwrap();

        let roles: Vec<Role> = session.transcript().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::Interviewer, Role::Candidate]);
        assert_eq!(session.transcript()[1].content, "I lead a data team.");
    }

    #[test]
    fn test_append_after_end_fails_and_leaves_transcript_unchanged() {
        let mut session = active_session();
        session.append_interviewer_turn("Hello").unwrap();
        session.end();

        let err = session.append_candidate_turn("one more thing").unwrap_err();
        assert!(matches!(err, InterviewError::InvalidState(_)));
        let err = session.append_interviewer_turn("and another").unwrap_err();
        assert!(matches!(err, InterviewError::InvalidState(_)));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut session = active_session();
        session.append_candidate_turn("Hi").unwrap();

        let first: Vec<Turn> = session.end().0.to_vec();
        let ended_at = session.ended_at();
        assert!(ended_at.is_some());

        let (second, resume) = session.end();
        assert_eq!(first, second.to_vec());
        assert_eq!(resume, "5 years Python and AWS, led a team of 4");
        assert_eq!(session.ended_at(), ended_at);
        assert!(session.is_ended());
    }

    #[test]
    fn test_record_report_requires_ended_session_and_keeps_first() {
        let report = |summary: &str| FeedbackReport {
            scores: vec![],
            suggestions: vec![],
            summary: summary.to_string(),
            source: ReportSource::Generated,
        };

        let mut session = active_session();
        assert!(matches!(
            session.record_report(report("early")),
            Err(InterviewError::InvalidState(_))
        ));

        session.end();
        session.record_report(report("first")).unwrap();
        let kept = session.record_report(report("second")).unwrap();
        assert_eq!(kept.summary, "first");
        assert_eq!(session.report().unwrap().summary, "first");
    }
}
