//! In-memory operator chat log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry in the chat log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only log of operator questions and canned replies
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.messages.push(ChatMessage::new(ChatRole::User, content));
        self.messages.last().unwrap()
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.messages
            .push(ChatMessage::new(ChatRole::Assistant, content));
        self.messages.last().unwrap()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_preserves_order() {
        let mut log = ChatLog::new();
        log.push_user("@Budi, Has it arrived?");
        log.push_assistant("@Budi: Not arrived yet");

        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[0].role, ChatRole::User);
        assert_eq!(log.messages()[1].role, ChatRole::Assistant);
        assert!(log.messages()[0].content.contains("Has it arrived?"));
    }
}
