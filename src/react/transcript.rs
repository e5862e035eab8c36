use crate::llm::{LlmMessage, MessageRole};
use serde::Serialize;

/// Ordered record of one run's turns
///
/// The first turn is always the system instructions and the second the user's question.
/// After construction the transcript only grows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<LlmMessage>,
}

impl Transcript {
    pub fn new(system: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            messages: vec![LlmMessage::system(system), LlmMessage::user(question)],
        }
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(LlmMessage::assistant(content));
    }

    /// Append a tool result as `Observation: <result>` in a user turn.
    pub fn push_observation(&mut self, result: &str) {
        self.messages.push(LlmMessage::user(format!("Observation: {}", result)));
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(LlmMessage::user(content));
    }

    pub fn messages(&self) -> &[LlmMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&LlmMessage> {
        self.messages.last()
    }

    /// Content of the most recent assistant turn.
    pub fn last_assistant(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Assistant)
            .map(|m| m.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
