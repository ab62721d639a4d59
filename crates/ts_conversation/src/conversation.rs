//! The conversation store.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    error::{Error, Result},
    message::Message,
};

/// The identifier sent along with each request, so that the remote side can
/// correlate turns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConversationId(String);

impl ConversationId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self("default".to_owned())
    }
}

impl FromStr for ConversationId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.chars().any(char::is_control) {
            return Err(Error::InvalidId(s.to_owned()));
        }

        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for ConversationId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ConversationId> for String {
    fn from(id: ConversationId) -> Self {
        id.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered list of messages.
///
/// Messages can be appended and the assistant message of an in-flight turn
/// can be mutated, but messages are never removed or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    messages: Vec<Message>,
}

impl Conversation {
    #[must_use]
    pub const fn new(id: ConversationId) -> Self {
        Self {
            id,
            messages: vec![],
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Append a user message, returning its index.
    pub fn push_user(&mut self, text: impl Into<String>) -> usize {
        self.push(Message::user(text))
    }

    /// Append an empty assistant message for a new turn, returning its index
    /// and the message itself, ready to be streamed into.
    pub fn begin_turn(&mut self) -> (usize, &mut Message) {
        let index = self.push(Message::assistant());
        trace!(conversation = %self.id, index, "Started assistant message.");

        (index, &mut self.messages[index])
    }

    fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }
}

#[cfg(test)]
#[path = "conversation_tests.rs"]
mod tests;
