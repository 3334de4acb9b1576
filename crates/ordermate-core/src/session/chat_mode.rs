//! Chat mode types for session state management.

use serde::{Deserialize, Serialize};

/// Represents the conversational mode of a session.
///
/// The mode decides which branch a turn takes: free-form chat goes through
/// the context window and the generator, structured query goes through the
/// intent parser and the order detail resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Free-form conversation backed by the generator.
    FreeForm,
    /// Structured questions about sales orders.
    StructuredQuery,
}

impl ChatMode {
    /// Parses a mode name as used by the CLI (`freeform` / `orders`).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "freeform" | "free-form" | "chat" => Some(ChatMode::FreeForm),
            "orders" | "order" | "structured" => Some(ChatMode::StructuredQuery),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatMode::FreeForm => f.write_str("freeform"),
            ChatMode::StructuredQuery => f.write_str("orders"),
        }
    }
}
