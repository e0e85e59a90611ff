//! Chat completion request types.

use crate::{MaasConfig, Role};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One piece of message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text
    Text {
        /// The text itself
        text: String,
    },
}

/// A message in the OpenAI chat format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message
    pub role: Role,
    /// Message content parts
    pub content: Vec<ContentPart>,
}

impl ChatMessage {
    /// A user message holding a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentPart::Text { text: text.into() }],
        }
    }
}

/// OpenAI chat completion request.
///
/// Lives only for the duration of one call.
#[derive(Debug, Clone, PartialEq, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Nucleus-sampling threshold
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl ChatRequest {
    /// Creates a new builder for ChatRequest.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }

    /// Builds the single-turn request sent for `prompt`.
    ///
    /// # Examples
    ///
    /// ```
    /// use maas_core::{ChatRequest, MaasConfig};
    ///
    /// let req = ChatRequest::from_prompt(&MaasConfig::default(), "hello");
    /// let json = serde_json::to_value(&req).unwrap();
    /// assert_eq!(json["messages"][0]["content"][0]["type"], "text");
    /// assert_eq!(json["max_tokens"], 8192);
    /// ```
    pub fn from_prompt(config: &MaasConfig, prompt: impl Into<String>) -> Self {
        Self {
            model: config.model_id().clone(),
            messages: vec![ChatMessage::user_text(prompt)],
            max_tokens: Some(*config.max_tokens()),
            temperature: Some(*config.temperature()),
            top_p: Some(*config.top_p()),
        }
    }
}
