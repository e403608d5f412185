//! Conversation state machine for the prompt-refinement chat.
//!
//! Owns the transcript and the pending-request flag. The "final prompt"
//! shown on the creation canvas is a pure derivation over the transcript,
//! not separately stored state.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Immutable once created; ids are unique and
/// strictly increasing in creation order within a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    next_id: u64,
    awaiting_reply: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while an enhancement request is in flight; new submissions are
    /// rejected until `complete` or `fail` runs.
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    fn push(&mut self, role: Role, content: String) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        let index = self.messages.len();
        self.messages.push(ChatMessage { id, role, content });
        &self.messages[index]
    }

    /// Record a user submission and enter the awaiting-reply state.
    pub fn submit(&mut self, text: &str) -> Result<&ChatMessage> {
        if self.awaiting_reply {
            return Err(Error::Invariant(
                "an enhancement request is already in flight".to_string(),
            ));
        }

        self.awaiting_reply = true;
        Ok(self.push(Role::User, text.to_string()))
    }

    /// Record the assistant's reply and return to idle.
    pub fn complete(&mut self, reply: String) -> &ChatMessage {
        self.awaiting_reply = false;
        self.push(Role::Assistant, reply)
    }

    /// Return to idle without appending an assistant message. The caller is
    /// responsible for surfacing the failure.
    pub fn fail(&mut self) {
        self.awaiting_reply = false;
    }

    /// The content of the most recent assistant message, or `""` until one
    /// exists. Pure derivation over the transcript.
    pub fn final_prompt(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }

    /// Clear the transcript for a fresh creation.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.awaiting_reply = false;
    }
}
