use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tool::QueryTool;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ChatMessage {
    User {
        content: String,
        at: DateTime<Utc>,
    },
    Assistant {
        content: String,
        tool: Option<QueryTool>,
        executed_query: Option<String>,
        at: DateTime<Utc>,
    },
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage::User {
            content: content.into(),
            at: Utc::now(),
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        tool: Option<QueryTool>,
        executed_query: Option<String>,
    ) -> Self {
        ChatMessage::Assistant {
            content: content.into(),
            tool,
            executed_query,
            at: Utc::now(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ChatMessage::User { content, .. } | ChatMessage::Assistant { content, .. } => content,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, ChatMessage::User { .. })
    }

    pub fn tool(&self) -> Option<QueryTool> {
        match self {
            ChatMessage::Assistant { tool, .. } => *tool,
            ChatMessage::User { .. } => None,
        }
    }

    /// Query text that produced this answer, as the human confirmed it.
    pub fn executed_query(&self) -> Option<&str> {
        match self {
            ChatMessage::Assistant { executed_query, .. } => executed_query.as_deref(),
            ChatMessage::User { .. } => None,
        }
    }
}

/// Ordered conversation history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&ChatMessage> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Group messages into question/answer rounds.
    ///
    /// A user message is paired with the assistant message right after it.
    /// Unanswered questions and stray assistant messages form rounds of their own.
    pub fn pairs(&self) -> Vec<(Option<&ChatMessage>, Option<&ChatMessage>)> {
        let mut rounds = Vec::new();
        let mut i = 0;
        while i < self.messages.len() {
            let current = &self.messages[i];
            if current.is_user() {
                match self.messages.get(i + 1) {
                    Some(next) if !next.is_user() => {
                        rounds.push((Some(current), Some(next)));
                        i += 2;
                    }
                    _ => {
                        rounds.push((Some(current), None));
                        i += 1;
                    }
                }
            } else {
                rounds.push((None, Some(current)));
                i += 1;
            }
        }
        rounds
    }

    /// Indices of assistant messages, oldest first.
    pub fn assistant_indices(&self) -> Vec<usize> {
        self.messages
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_user())
            .map(|(i, _)| i)
            .collect()
    }
}
