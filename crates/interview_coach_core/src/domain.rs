//! crates/interview_coach_core/src/domain.rs
//!
//! Defines the pure, core data structures for the interview coach.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, Utc};

/// Who produced a turn in the interview dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Candidate,
    Interviewer,
}

impl Role {
    /// The speaker label used when a transcript is rendered as plain text.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Candidate => "Candidate",
            Role::Interviewer => "Interviewer",
        }
    }
}

/// A single utterance within an interview. Never modified once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Heuristic résumé signals shown next to the interview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Insights {
    pub keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// One scored dimension of a feedback report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub label: String,
    /// Always within 0..=100.
    pub value: u8,
    pub color_tag: String,
}

/// Where a feedback report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    /// Parsed from the generation service's evaluation.
    Generated,
    /// The fixed report used when the service could not be used.
    Fallback,
}

/// The scored evaluation produced once an interview has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackReport {
    pub scores: Vec<Score>,
    pub suggestions: Vec<String>,
    pub summary: String,
    pub source: ReportSource,
}

impl FeedbackReport {
    pub fn is_fallback(&self) -> bool {
        self.source == ReportSource::Fallback
    }
}
