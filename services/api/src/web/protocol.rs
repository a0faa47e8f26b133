//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API server.
//! The core domain stays free of serialization concerns; these views are built from it.

use chrono::{DateTime, Utc};
use interview_coach_core::{FeedbackReport, Insights, InterviewSession, Role, Score, Turn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Payloads Sent FROM the Client TO the Server
//=========================================================================================

/// Starts an interview from pasted résumé text.
#[derive(Deserialize, Debug, ToSchema)]
pub struct StartInterviewRequest {
    pub resume: String,
}

/// The candidate's answer for the current interview turn.
#[derive(Deserialize, Debug, ToSchema)]
pub struct SendTurnRequest {
    pub message: String,
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client
//=========================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct InsightsView {
    pub keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl From<&Insights> for InsightsView {
    fn from(insights: &Insights) -> Self {
        Self {
            keywords: insights.keywords.clone(),
            strengths: insights.strengths.clone(),
            weaknesses: insights.weaknesses.clone(),
        }
    }
}

/// Sent after an interview has been created.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StartInterviewResponse {
    pub session_id: Uuid,
    pub insights: InsightsView,
    /// The interviewer's opening question.
    pub greeting: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    Candidate,
    Interviewer,
}

impl From<Role> for TurnRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Candidate => TurnRole::Candidate,
            Role::Interviewer => TurnRole::Interviewer,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct TurnView {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Turn> for TurnView {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role.into(),
            content: turn.content.clone(),
            timestamp: turn.timestamp,
        }
    }
}

/// The full state of an interview, for rendering or resuming the page.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    /// Either `active` or `ended`.
    pub status: String,
    pub insights: InsightsView,
    pub transcript: Vec<TurnView>,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl From<&InterviewSession> for SessionView {
    fn from(session: &InterviewSession) -> Self {
        Self {
            session_id: session.id(),
            status: session.status().as_str().to_string(),
            insights: session.insights().into(),
            transcript: session.transcript().iter().map(TurnView::from).collect(),
            created_at: session.created_at(),
            ended_at: session.ended_at(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SendTurnResponse {
    pub reply: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ScoreView {
    pub label: String,
    pub score: u8,
    pub color: String,
}

impl From<&Score> for ScoreView {
    fn from(score: &Score) -> Self {
        Self {
            label: score.label.clone(),
            score: score.value,
            color: score.color_tag.clone(),
        }
    }
}

/// The feedback shown on the report page. The fallback flag is not exposed.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct FeedbackReportView {
    pub scores: Vec<ScoreView>,
    pub suggestions: Vec<String>,
    pub summary: String,
}

impl From<&FeedbackReport> for FeedbackReportView {
    fn from(report: &FeedbackReport) -> Self {
        Self {
            scores: report.scores.iter().map(ScoreView::from).collect(),
            suggestions: report.suggestions.clone(),
            summary: report.summary.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
