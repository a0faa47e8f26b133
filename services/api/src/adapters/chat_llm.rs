//! services/api/src/adapters/chat_llm.rs
//!
//! This module contains the adapter for an OpenAI-compatible chat-completion LLM.
//! It implements the `GenerationService` port from the `core` crate, and is used
//! both for interviewer replies and for the end-of-interview evaluation.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use interview_coach_core::ports::{
    ChatMessage, ChatRole, GenerationRequest, GenerationService, PortError, PortResult,
};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `GenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiChatAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChatAdapter {
    /// Creates a new `OpenAiChatAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    fn to_request_message(message: &ChatMessage) -> PortResult<ChatCompletionRequestMessage> {
        let built = match message.role {
            ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                .content(message.content.as_str())
                .build()
                .map(ChatCompletionRequestMessage::from),
            ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(message.content.as_str())
                .build()
                .map(ChatCompletionRequestMessage::from),
        };
        built.map_err(|e| PortError::InvalidRequest(e.to_string()))
    }
}

//=========================================================================================
// `GenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl GenerationService for OpenAiChatAdapter {
    /// Sends the system instructions followed by the ordered history as one chat completion.
    async fn generate(&self, request: &GenerationRequest) -> PortResult<String> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system_instructions.as_str())
                .build()
                .map_err(|e| PortError::InvalidRequest(e.to_string()))?
                .into(),
        );
        for message in &request.messages {
            messages.push(Self::to_request_message(message)?);
        }

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(request.sampling.temperature)
            .max_completion_tokens(request.sampling.max_output_tokens)
            .n(1)
            .build()
            .map_err(|e| PortError::InvalidRequest(e.to_string()))?;

        debug!(
            model = %self.model,
            messages = request.messages.len(),
            "Sending chat completion request."
        );

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(PortError::EmptyResponse)
    }
}
