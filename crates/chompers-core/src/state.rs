//! UI-agnostic chat state types
//!
//! This module contains data structures that are shared between the TUI and
//! any other frontend and don't depend on any specific UI framework.

use serde::{Deserialize, Serialize};

/// One entry in the chat transcript.
///
/// Messages are created on send or on receipt of a reply and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// Model label reported by the backend. `None` for user messages and for
    /// replies that omit it; the renderer falls back to the default label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            model: None,
        }
    }

    pub fn assistant(content: impl Into<String>, model: Option<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            model,
        }
    }
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_carry_no_model() {
        let msg = ChatMessage::user("hello");
        assert_eq!(msg.role, ChatRole::User);
        assert_eq!(msg.content, "hello");
        assert!(msg.model.is_none());
    }

    #[test]
    fn assistant_messages_keep_reported_model() {
        let msg = ChatMessage::assistant("hi", Some("deepseek-r1:7b".to_string()));
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(msg.model.as_deref(), Some("deepseek-r1:7b"));
    }
}
