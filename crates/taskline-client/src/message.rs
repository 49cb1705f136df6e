//! Conversation message types.
//!
//! Messages are immutable once appended: the controller owns an append-only,
//! submission-ordered sequence of them for the life of the conversation.

use chrono::{DateTime, Utc};

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A goal submitted by the user.
    User,
    /// The orchestrator's final output for a run.
    Assistant,
    /// A failed submission, surfaced in-line.
    Error,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "You"),
            Self::Assistant => write!(f, "Assistant"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single message in the conversation.
#[derive(Debug, Clone)]
pub struct Message {
    /// Role of the message author.
    pub role: Role,
    /// Message content.
    pub content: String,
    /// When the message was appended.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a new error message.
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            role: Role::Error,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("Plan a trip");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.content, "Plan a trip");

        let assistant = Message::assistant("Here is the plan");
        assert_eq!(assistant.role, Role::Assistant);

        let error = Message::error("request failed");
        assert_eq!(error.role, Role::Error);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "You");
        assert_eq!(Role::Assistant.to_string(), "Assistant");
        assert_eq!(Role::Error.to_string(), "Error");
    }
}
