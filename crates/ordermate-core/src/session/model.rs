//! Session domain model.
//!
//! This module contains the core Session entity that represents one ongoing
//! conversation with its own transcript and mode.

use super::chat_mode::ChatMode;
use super::message::ChatMessage;
use serde::{Deserialize, Serialize};

/// One ongoing conversation.
///
/// A session owns its message sequence exclusively; the sequence is mutated
/// only by appending, and `storage_key` names the persisted transcript file
/// for the session. The key is assigned once, at creation, and never
/// renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier (the storage key without its file extension).
    pub id: String,
    /// Current conversational mode.
    pub mode: ChatMode,
    /// Full message history, in insertion order.
    pub messages: Vec<ChatMessage>,
    /// Name of the persisted transcript file.
    pub storage_key: String,
}

impl Session {
    /// Creates a fresh, empty session with a timestamp-derived storage key.
    pub fn new(mode: ChatMode) -> Self {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        Self::with_storage_key(mode, format!("chat_{}.txt", stamp))
    }

    /// Creates an empty session with an explicit storage key.
    pub fn with_storage_key(mode: ChatMode, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        Self {
            id: storage_key.trim_end_matches(".txt").to_string(),
            mode,
            messages: Vec::new(),
            storage_key,
        }
    }

    /// Rebuilds a session from a previously persisted transcript.
    pub fn from_transcript(
        mode: ChatMode,
        storage_key: impl Into<String>,
        messages: Vec<ChatMessage>,
    ) -> Self {
        let mut session = Self::with_storage_key(mode, storage_key);
        session.messages = messages;
        session
    }

    /// Appends a message to the history.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Number of messages in the full history.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the session has no messages yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_derives_id_from_storage_key() {
        let session = Session::new(ChatMode::FreeForm);
        assert!(session.storage_key.starts_with("chat_"));
        assert!(session.storage_key.ends_with(".txt"));
        assert_eq!(format!("{}.txt", session.id), session.storage_key);
        assert!(session.is_empty());
    }

    #[test]
    fn from_transcript_keeps_messages_in_order() {
        let messages = vec![ChatMessage::user("hi"), ChatMessage::bot("hello")];
        let session =
            Session::from_transcript(ChatMode::FreeForm, "chat_x.txt", messages.clone());
        assert_eq!(session.messages, messages);
        assert_eq!(session.id, "chat_x");
    }
}
