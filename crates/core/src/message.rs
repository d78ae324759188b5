//! Message and transcript domain types.
//!
//! A transcript is the flat, ordered history of one user's exchanges with the bot:
//! User sends a message → Responder picks a reply → both land in the user's transcript.

use serde::{Deserialize, Serialize};

/// The role of a message sender in a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The chatbot
    Bot,
}

/// A single message in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new bot message.
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
        }
    }
}

/// Ordered message history for one user identifier.
pub type Transcript = Vec<Message>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Hello, bot!");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello, bot!");
    }

    #[test]
    fn message_wire_format() {
        let json = serde_json::to_value(Message::bot("Glad to help!")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "bot", "content": "Glad to help!"})
        );
    }

    #[test]
    fn role_rejects_unknown_values() {
        let parsed: Result<Role, _> = serde_json::from_str("\"assistant\"");
        assert!(parsed.is_err());
    }
}
