//! Chat data model: message categories and reply envelopes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response buckets, in classification priority order.
/// Crisis is checked before everything else and short-circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// High-risk phrase detected; overrides all other matches
    Crisis,
    Greeting,
    Anxiety,
    Depression,
    Stress,
    Positive,
    Coping,
    /// Talking about feelings or mood in general
    Mood,
    /// Nothing matched; generic supportive response
    Support,
}

impl Category {
    /// ANSI color for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Category::Crisis => "\x1b[31m",  // Red
            Category::Positive => "\x1b[32m", // Green
            Category::Greeting => "\x1b[36m", // Cyan
            _ => "\x1b[90m",                  // Gray
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Crisis => "CRISIS",
            Category::Greeting => "GREETING",
            Category::Anxiety => "ANXIETY",
            Category::Depression => "DEPRESSION",
            Category::Stress => "STRESS",
            Category::Positive => "POSITIVE",
            Category::Coping => "COPING",
            Category::Mood => "MOOD",
            Category::Support => "SUPPORT",
        };
        write!(f, "{}", name)
    }
}

/// Who sent a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

/// A single chat message. Held only by the view's transient transcript,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            author: Author::Assistant,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Result of classifying one user message and picking a reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub category: Category,
    pub text: String,
    /// Set iff a crisis phrase was present; the view must surface the
    /// crisis-resources banner whenever this is true.
    pub is_crisis: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&Category::Crisis).unwrap();
        assert_eq!(json, "\"CRISIS\"");
    }

    #[test]
    fn test_author_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Author::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Author::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_message_constructors() {
        let m = ChatMessage::user("hello");
        assert_eq!(m.author, Author::User);
        assert_eq!(m.text, "hello");
    }
}
