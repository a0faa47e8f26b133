//! crates/interview_coach_core/src/feedback.rs
//!
//! Turns a finished transcript into a scored feedback report.
//!
//! The evaluation is requested from the generation service exactly once. Any
//! failure on that path (service error, unparseable or incomplete JSON) yields the
//! fixed fallback report instead of an error.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{FeedbackReport, ReportSource, Score, Turn};
use crate::error::{InterviewError, InterviewResult};
use crate::ports::{ChatMessage, GenerationRequest, GenerationService, SamplingParams};

const EVALUATION_INSTRUCTIONS: &str = r#"You are an expert interview coach analyzing a job interview.
Respond with ONLY a JSON object that has exactly this structure:
{
  "scores": [
    {"label": "Confidence", "score": 0-100},
    {"label": "Communication Clarity", "score": 0-100},
    {"label": "Technical Depth", "score": 0-100}
  ],
  "suggestions": ["suggestion 1", "suggestion 2", "suggestion 3"],
  "summary": "Brief overall assessment"
}

Scores are integers from 0 to 100. Suggestions are short sentences.
Be fair but honest. Consider the candidate's responses, clarity, technical knowledge, and communication skills."#;

const EVALUATION_REQUEST_TEMPLATE: &str = r#"Please analyze this interview and provide feedback:

Resume:
{resume}

Interview Transcript:
{transcript}"#;

/// Dimensions every generated evaluation must score.
pub const REQUIRED_LABELS: &[&str] = &[
    "Confidence",
    "Communication Clarity",
    "Technical Depth",
];

/// Scores reported when the evaluation cannot be obtained.
pub const FALLBACK_SCORES: &[(&str, u8)] = &[
    ("Confidence", 78),
    ("Communication Clarity", 82),
    ("Technical Depth", 75),
];

const DEFAULT_COLOR_TAG: &str = "bg-gray-500";

/// Display color for a score label.
pub fn color_tag_for(label: &str) -> &'static str {
    match label {
        "Confidence" => "bg-blue-500",
        "Communication Clarity" => "bg-green-500",
        "Technical Depth" => "bg-purple-500",
        _ => DEFAULT_COLOR_TAG,
    }
}

/// The deterministic report used whenever the evaluation call cannot be used.
pub fn fallback_report() -> FeedbackReport {
    FeedbackReport {
        scores: FALLBACK_SCORES
            .iter()
            .map(|(label, value)| Score {
                label: label.to_string(),
                value: *value,
                color_tag: color_tag_for(label).to_string(),
            })
            .collect(),
        suggestions: Vec::new(),
        summary: String::new(),
        source: ReportSource::Fallback,
    }
}

/// Renders turns as alternating "Candidate:" / "Interviewer:" paragraphs.
pub fn render_transcript(transcript: &[Turn]) -> String {
    transcript
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the single evaluation request for a résumé and transcript.
pub fn build_evaluation_request(
    resume: &str,
    transcript: &[Turn],
    sampling: SamplingParams,
) -> GenerationRequest {
    let user_message = EVALUATION_REQUEST_TEMPLATE
        .replace("{resume}", resume)
        .replace("{transcript}", &render_transcript(transcript));

    GenerationRequest {
        system_instructions: EVALUATION_INSTRUCTIONS.to_string(),
        messages: vec![ChatMessage::user(user_message)],
        sampling,
    }
}

//=========================================================================================
// Wire format of the evaluation
//=========================================================================================

#[derive(Debug, Deserialize)]
struct EvaluationPayload {
    scores: Vec<ScorePayload>,
    suggestions: Vec<String>,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct ScorePayload {
    label: String,
    score: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationParseError {
    #[error("evaluation is not valid JSON for the expected schema: {0}")]
    Json(#[from] serde_json::Error),
    #[error("evaluation contains no scores")]
    NoScores,
    #[error("score label is blank")]
    BlankLabel,
    #[error("score for '{label}' is {value}, outside 0-100")]
    OutOfRange { label: String, value: u8 },
    #[error("label '{0}' is scored more than once")]
    DuplicateLabel(String),
    #[error("evaluation has no score for '{0}'")]
    MissingLabel(&'static str),
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}

/// Parses the evaluation text strictly against the declared schema.
pub fn parse_evaluation(text: &str) -> Result<FeedbackReport, EvaluationParseError> {
    let payload: EvaluationPayload = serde_json::from_str(strip_json_fences(text))?;

    if payload.scores.is_empty() {
        return Err(EvaluationParseError::NoScores);
    }

    let mut seen = HashSet::new();
    let scores = payload
        .scores
        .into_iter()
        .map(|entry| {
            let label = entry.label.trim().to_string();
            if label.is_empty() {
                return Err(EvaluationParseError::BlankLabel);
            }
            if !seen.insert(label.clone()) {
                return Err(EvaluationParseError::DuplicateLabel(label));
            }
            if entry.score > 100 {
                return Err(EvaluationParseError::OutOfRange {
                    label,
                    value: entry.score,
                });
            }
            Ok(Score {
                color_tag: color_tag_for(&label).to_string(),
                label,
                value: entry.score,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(missing) = REQUIRED_LABELS
        .iter()
        .find(|required| !seen.contains(**required))
    {
        return Err(EvaluationParseError::MissingLabel(*missing));
    }

    Ok(FeedbackReport {
        scores,
        suggestions: payload.suggestions,
        summary: payload.summary,
        source: ReportSource::Generated,
    })
}

//=========================================================================================
// The Aggregator
//=========================================================================================

/// Requests, parses and, when needed, replaces the end-of-interview evaluation.
#[derive(Clone)]
pub struct FeedbackAggregator {
    gateway: Arc<dyn GenerationService>,
    sampling: SamplingParams,
}

impl FeedbackAggregator {
    pub fn new(gateway: Arc<dyn GenerationService>, sampling: SamplingParams) -> Self {
        Self { gateway, sampling }
    }

    /// Produces the report for a finished interview.
    ///
    /// Only a blank résumé or an empty transcript is an error. The gateway is
    /// called once, without retry.
    pub async fn generate_report(
        &self,
        resume: &str,
        transcript: &[Turn],
    ) -> InterviewResult<FeedbackReport> {
        if resume.trim().is_empty() {
            return Err(InterviewError::InvalidInput(
                "A résumé is required to generate feedback.".to_string(),
            ));
        }
        if transcript.is_empty() {
            return Err(InterviewError::InvalidInput(
                "The interview transcript is empty.".to_string(),
            ));
        }

        let request = build_evaluation_request(resume, transcript, self.sampling);

        let text = match self.gateway.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Feedback generation failed, using fallback report: {}", e);
                return Ok(fallback_report());
            }
        };

        match parse_evaluation(&text) {
            Ok(report) => {
                info!(scores = report.scores.len(), "Feedback report generated.");
                Ok(report)
            }
            Err(e) => {
                warn!("Feedback evaluation was malformed, using fallback report: {}", e);
                Ok(fallback_report())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::ports::{ChatRole, PortError};
    use crate::test_support::ScriptedGateway;

    const VALID_EVALUATION: &str = r#"{
        "scores": [
            {"label": "Confidence", "score": 64},
            {"label": "Communication Clarity", "score": 90},
            {"label": "Technical Depth", "score": 55}
        ],
        "suggestions": ["Quantify your impact", "Slow down"],
        "summary": "Solid communicator, needs more depth."
    }"#;

    fn transcript() -> Vec<Turn> {
        vec![
            Turn::new(Role::Interviewer, "Tell me about yourself."),
            Turn::new(Role::Candidate, "I build APIs in Python."),
            Turn::new(Role::Interviewer, "How do you test them?"),
        ]
    }

    fn aggregator(gateway: &Arc<ScriptedGateway>) -> FeedbackAggregator {
        FeedbackAggregator::new(gateway.clone(), SamplingParams::FEEDBACK)
    }

    fn score_pairs(report: &FeedbackReport) -> Vec<(&str, u8)> {
        report
            .scores
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect()
    }

    #[test]
    fn test_fallback_report_is_fixed() {
        let report = fallback_report();
        assert!(report.is_fallback());
        assert_eq!(
            score_pairs(&report),
            vec![
                ("Confidence", 78),
                ("Communication Clarity", 82),
                ("Technical Depth", 75)
            ]
        );
        let colors: Vec<&str> = report.scores.iter().map(|s| s.color_tag.as_str()).collect();
        assert_eq!(colors, vec!["bg-blue-500", "bg-green-500", "bg-purple-500"]);
        assert!(report.suggestions.is_empty());
        assert!(report.summary.is_empty());
    }

    #[test]
    fn test_render_transcript_alternates_speakers() {
        let rendered = render_transcript(&transcript());
        assert_eq!(
            rendered,
            "Interviewer: Tell me about yourself.\n\nCandidate: I build APIs in Python.\n\nInterviewer: How do you test them?"
        );
    }

    #[test]
    fn test_evaluation_request_shape() {
        let request =
            build_evaluation_request("Python dev", &transcript(), SamplingParams::FEEDBACK);
        assert!(request.system_instructions.contains("\"scores\""));
        assert!(request.system_instructions.contains("Technical Depth"));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, ChatRole::User);
        assert!(request.messages[0].content.contains("Resume:\nPython dev"));
        assert!(request.messages[0]
            .content
            .contains("Candidate: I build APIs in Python."));
        assert_eq!(request.sampling.max_output_tokens, 500);
    }

    #[test]
    fn test_parse_valid_evaluation() {
        let report = parse_evaluation(VALID_EVALUATION).unwrap();
        assert_eq!(report.source, ReportSource::Generated);
        assert_eq!(
            score_pairs(&report),
            vec![
                ("Confidence", 64),
                ("Communication Clarity", 90),
                ("Technical Depth", 55)
            ]
        );
        assert_eq!(report.scores[1].color_tag, "bg-green-500");
        assert_eq!(report.suggestions.len(), 2);
        assert_eq!(report.summary, "Solid communicator, needs more depth.");
    }

    #[test]
    fn test_parse_accepts_fenced_json() {
        let fenced = format!("```json\n{}\n```", VALID_EVALUATION);
        assert!(parse_evaluation(&fenced).is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed_payloads() {
        let cases = [
            "not json at all",
            r#"{"scores": [], "suggestions": [], "summary": ""}"#,
            r#"{"scores": [{"label": "Confidence", "score": 70}], "summary": "x"}"#,
            r#"{"scores": [{"label": "Confidence", "score": 170}], "suggestions": [], "summary": ""}"#,
            r#"{"scores": [{"label": "Confidence", "score": -3}], "suggestions": [], "summary": ""}"#,
            r#"{"scores": [{"label": "Confidence", "score": "high"}], "suggestions": [], "summary": ""}"#,
            r#"{"scores": [{"label": "  ", "score": 50}], "suggestions": [], "summary": ""}"#,
        ];
        for case in cases {
            assert!(parse_evaluation(case).is_err(), "expected failure for {case}");
        }
    }

    fn evaluation_with_scores(scores: &str) -> String {
        format!(r#"{{"scores": [{scores}], "suggestions": [], "summary": ""}}"#)
    }

    #[test]
    fn test_extra_label_is_kept_with_default_color() {
        let text = evaluation_with_scores(
            r#"{"label": "Confidence", "score": 70},
               {"label": "Communication Clarity", "score": 60},
               {"label": "Technical Depth", "score": 50},
               {"label": "Curiosity", "score": 40}"#,
        );
        let report = parse_evaluation(&text).unwrap();
        assert_eq!(report.scores.len(), 4);
        assert_eq!(report.scores[3].label, "Curiosity");
        assert_eq!(report.scores[3].color_tag, "bg-gray-500");
    }

    #[test]
    fn test_parse_requires_every_fixed_dimension() {
        let text = evaluation_with_scores(
            r#"{"label": "Confidence", "score": 70},
               {"label": "Curiosity", "score": 40}"#,
        );
        assert!(matches!(
            parse_evaluation(&text),
            Err(EvaluationParseError::MissingLabel("Communication Clarity"))
        ));
    }

    #[test]
    fn test_parse_rejects_duplicate_labels() {
        let text = evaluation_with_scores(
            r#"{"label": "Confidence", "score": 70},
               {"label": "Confidence", "score": 10},
               {"label": "Communication Clarity", "score": 60},
               {"label": "Technical Depth", "score": 50}"#,
        );
        assert!(matches!(
            parse_evaluation(&text),
            Err(EvaluationParseError::DuplicateLabel(label)) if label == "Confidence"
        ));
    }

    #[tokio::test]
    async fn test_generate_report_falls_back_on_duplicate_only_evaluation() {
        let text = evaluation_with_scores(
            r#"{"label": "Confidence", "score": 70},
               {"label": "Confidence", "score": 10}"#,
        );
        let gateway = Arc::new(ScriptedGateway::replying(&text));
        let report = aggregator(&gateway)
            .generate_report("Python dev", &transcript())
            .await
            .unwrap();
        assert_eq!(report, fallback_report());
    }

    #[tokio::test]
    async fn test_generate_report_uses_service_output() {
        let gateway = Arc::new(ScriptedGateway::replying(VALID_EVALUATION));
        let report = aggregator(&gateway)
            .generate_report("Python dev", &transcript())
            .await
            .unwrap();

        assert!(!report.is_fallback());
        assert_eq!(report.scores[0].value, 64);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_report_falls_back_when_gateway_fails() {
        let gateway = Arc::new(ScriptedGateway::failing(PortError::Upstream(
            "connection reset".to_string(),
        )));
        let report = aggregator(&gateway)
            .generate_report("Python dev", &transcript())
            .await
            .unwrap();

        assert_eq!(report, fallback_report());
        assert_eq!(gateway.call_count(), 1, "no retry expected");
    }

    #[tokio::test]
    async fn test_generate_report_falls_back_on_malformed_json() {
        let gateway = Arc::new(ScriptedGateway::replying("{\"scores\": [ oops"));
        let report = aggregator(&gateway)
            .generate_report("Python dev", &transcript())
            .await
            .unwrap();

        assert!(report.is_fallback());
        assert!(report.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_generate_report_rejects_empty_inputs_without_calling_gateway() {
        let gateway = Arc::new(ScriptedGateway::replying(VALID_EVALUATION));
        let aggregator = aggregator(&gateway);

        let err = aggregator.generate_report("Python dev", &[]).await.unwrap_err();
        assert!(matches!(err, InterviewError::InvalidInput(_)));

        let err = aggregator
            .generate_report("  ", &transcript())
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::InvalidInput(_)));

        assert_eq!(gateway.call_count(), 0);
    }
}
