//! Defines the Message structure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The author of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Assistant => f.write_str("assistant"),
        }
    }
}

/// A single message in a [`Conversation`].
///
/// While a turn is streaming, the answer and reasoning text of the assistant
/// message only ever grow. Once the turn ends, the message is left as-is.
///
/// [`Conversation`]: crate::Conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,

    /// The user-facing text of the message.
    pub answer_text: String,

    /// Reasoning text, if the assistant produced any.
    ///
    /// This stays `None` for turns that never produced reasoning, and is
    /// always `None` for user messages.
    pub reasoning_text: Option<String>,
}

impl Message {
    /// Create a user message with the given text.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            answer_text: text.into(),
            reasoning_text: None,
        }
    }

    /// Create an empty assistant message, ready to be streamed into.
    #[must_use]
    pub const fn assistant() -> Self {
        Self {
            role: Role::Assistant,
            answer_text: String::new(),
            reasoning_text: None,
        }
    }

    #[must_use]
    pub const fn is_assistant(&self) -> bool {
        matches!(self.role, Role::Assistant)
    }

    /// Append text to the answer.
    pub fn push_answer(&mut self, text: &str) {
        self.answer_text.push_str(text);
    }

    /// Append text to the reasoning, creating it if absent.
    ///
    /// Empty text does not create the reasoning field.
    pub fn push_reasoning(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        self.reasoning_text
            .get_or_insert_with(String::new)
            .push_str(text);
    }

    /// Returns the reasoning text, if any non-empty reasoning was recorded.
    #[must_use]
    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning_text.as_deref().filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
