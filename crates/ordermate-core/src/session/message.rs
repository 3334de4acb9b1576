//! Conversation message types.
//!
//! This module contains types for representing messages in a conversation,
//! including the sender side and the message content.

use serde::{Deserialize, Serialize};

/// Which side of the conversation a message came from.
///
/// The text labels (`"Human"` / `"Bot"`) are load-bearing: they appear both
/// in the prompt fed to the generator and in persisted transcript lines, and
/// they must round-trip through [`Sender::parse`]. Neither label contains
/// `": "`, which the transcript line format relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    /// Message typed by the user.
    User,
    /// Message produced by the assistant.
    Bot,
}

impl Sender {
    /// The stable text label used in prompts and transcripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "Human",
            Sender::Bot => "Bot",
        }
    }

    /// Parses a transcript sender label back into a `Sender`.
    ///
    /// Returns `None` for anything that is not exactly one of the two
    /// labels; callers treat that as transcript corruption.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Human" => Some(Sender::User),
            "Bot" => Some(Sender::Bot),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a conversation history.
///
/// Messages are immutable once created; conversation order is the insertion
/// order of the owning sequence, not anything derived from the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Which side sent the message.
    pub sender: Sender,
    /// The message text.
    pub content: String,
    /// Wall-clock timestamp at creation, `%Y-%m-%d %H:%M:%S`.
    ///
    /// The format never contains the literal `" - "` separator, which the
    /// transcript loader splits on.
    pub timestamp: String,
}

impl ChatMessage {
    /// Creates a message with an explicit timestamp (used when loading
    /// persisted transcripts).
    pub fn new(sender: Sender, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Creates a user message stamped with the current local time.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content, now_stamp())
    }

    /// Creates a bot message stamped with the current local time.
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Sender::Bot, content, now_stamp())
    }
}

fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_labels_round_trip() {
        for sender in [Sender::User, Sender::Bot] {
            assert_eq!(Sender::parse(sender.as_str()), Some(sender));
        }
        assert_eq!(Sender::parse("System"), None);
    }

    #[test]
    fn timestamp_has_no_line_separator() {
        let msg = ChatMessage::user("hello");
        assert!(!msg.timestamp.contains(" - "));
    }

    #[test]
    fn sender_labels_have_no_colon_space() {
        assert!(!Sender::User.as_str().contains(": "));
        assert!(!Sender::Bot.as_str().contains(": "));
    }
}
