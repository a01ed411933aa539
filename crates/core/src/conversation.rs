//! Conversation types: roles and stored messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Role in a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// Farmer message
    User,
    /// Advisor message
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single stored message in a session.
///
/// Messages are append-only and strictly ordered by `created_at`; every
/// history window any component consumes is derived from that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Owning session
    pub session_id: String,
    /// Role of the speaker
    pub role: TurnRole,
    /// Raw content
    pub content: String,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message
    pub fn new(session_id: impl Into<String>, role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a user message
    pub fn user(session_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(session_id, TurnRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(session_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(session_id, TurnRole::Assistant, content)
    }

    /// Word count using Unicode word boundaries, so Telugu and Devanagari
    /// text counts correctly.
    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }
}

/// Unicode-aware word count
pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("s1", "My paddy has pests");
        assert_eq!(msg.role, TurnRole::User);
        assert_eq!(msg.session_id, "s1");
        assert_eq!(msg.word_count(), 4);

        let msg = Message::assistant("s1", "Which crop are you growing?");
        assert_eq!(msg.role, TurnRole::Assistant);
    }

    #[test]
    fn test_word_count_indic() {
        assert_eq!(word_count("పోషక్ గురించి చెప్పండి"), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(TurnRole::User.as_str(), "user");
        assert_eq!(TurnRole::Assistant.as_str(), "assistant");
    }
}
