//! Chat completion response types.
//!
//! Unknown fields are kept in `extra` maps so a parsed response serializes
//! back to everything the server sent.

use maas_error::ParseError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token usage statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    /// Tokens in the completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,
    /// Total tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generated message inside a choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Generated text; `None` when the model produced nothing
    #[serde(default)]
    pub content: Option<String>,
    /// Reasoning trace emitted by reasoning models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A choice in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    /// The message content
    pub message: ResponseMessage,
    /// Reason for finishing
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// OpenAI chat completion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Response choices
    pub choices: Vec<Choice>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatCompletion {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying `body` when it is not a chat completion.
    ///
    /// # Examples
    ///
    /// ```
    /// use maas_core::ChatCompletion;
    ///
    /// let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"hi"}}]}"#;
    /// let completion = ChatCompletion::from_json(body).unwrap();
    /// assert_eq!(completion.text(), Some("hi"));
    ///
    /// assert!(ChatCompletion::from_json(r#"{"error":"nope"}"#).is_err());
    /// ```
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        serde_json::from_str(body)
            .map_err(|e| ParseError::new(format!("Failed to parse chat completion: {e}"), body))
    }

    /// The first choice, if any.
    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }

    /// Content of the first choice.
    ///
    /// `None` when there is no choice or the choice carries no content.
    pub fn text(&self) -> Option<&str> {
        self.first_choice()
            .and_then(|choice| choice.message.content.as_deref())
    }

    /// Pretty-printed JSON rendering of the whole response.
    pub fn to_pretty_json(&self) -> String {
        // Maps with string keys and plain data always serialize.
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}
