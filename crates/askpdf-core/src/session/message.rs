//! Chat message types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User message.
    User,
    /// Assistant response.
    Assistant,
}

/// A message in the conversation history.
///
/// Messages are append-only: once created they are never mutated, and the
/// transcript order is the insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID.
    id: Uuid,

    /// Message role.
    role: MessageRole,

    /// Message content.
    content: String,

    /// When the message was created.
    created_at: Timestamp,
}

impl Message {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: MessageRole::User,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: MessageRole::Assistant,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Returns the message ID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the message role.
    pub fn role(&self) -> MessageRole {
        self.role
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_roles() {
        let user = Message::user("Hello");
        let assistant = Message::assistant("Hi!");

        assert_eq!(user.role(), MessageRole::User);
        assert_eq!(assistant.role(), MessageRole::Assistant);
    }

    #[test]
    fn messages_carry_distinct_ids() {
        let first = Message::user("one");
        let second = Message::user("two");

        assert_ne!(first.id(), second.id());
    }
}
