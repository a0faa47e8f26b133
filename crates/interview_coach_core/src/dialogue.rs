//! crates/interview_coach_core/src/dialogue.rs
//!
//! Builds the request sent to the generation service for one interviewer reply.

use crate::domain::{Role, Turn};
use crate::ports::{ChatMessage, ChatRole, GenerationRequest, SamplingParams};

const INTERVIEWER_INSTRUCTIONS: &str = r#"You are an experienced technical interviewer conducting a realistic job interview.
You have reviewed the candidate's resume and are conducting a professional interview.

Resume Context:
{resume}

Your role is to:
1. Ask thoughtful, realistic interview questions grounded in the resume above
2. Follow up on the candidate's answers with probing questions
3. Assess their technical knowledge, communication skills, and problem-solving ability
4. Stay professional but conversational

Keep responses concise (2-3 sentences) and ask exactly one focused question per turn."#;

/// The instructions and full message history for a single interviewer reply.
#[derive(Debug, Clone, PartialEq)]
pub struct DialoguePrompt {
    pub system_instructions: String,
    pub ordered_messages: Vec<ChatMessage>,
}

impl DialoguePrompt {
    /// Attaches sampling settings, producing a request ready for the gateway.
    pub fn into_request(self, sampling: SamplingParams) -> GenerationRequest {
        GenerationRequest {
            system_instructions: self.system_instructions,
            messages: self.ordered_messages,
            sampling,
        }
    }
}

impl From<Role> for ChatRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Candidate => ChatRole::User,
            Role::Interviewer => ChatRole::Assistant,
        }
    }
}

/// Renders the interviewer system instructions for a résumé.
pub fn interviewer_instructions(resume: &str) -> String {
    INTERVIEWER_INSTRUCTIONS.replace("{resume}", resume)
}

/// Replays the whole transcript, in order, followed by the new candidate input.
///
/// The service keeps no history of its own, so nothing is truncated or summarized.
pub fn build_request(
    resume: &str,
    transcript: &[Turn],
    new_candidate_input: &str,
) -> DialoguePrompt {
    let ordered_messages = transcript
        .iter()
        .map(|turn| ChatMessage {
            role: turn.role.into(),
            content: turn.content.clone(),
        })
        .chain(std::iter::once(ChatMessage::user(new_candidate_input)))
        .collect();

    DialoguePrompt {
        system_instructions: interviewer_instructions(resume),
        ordered_messages,
    }
}
