//! Session domain module.
//!
//! This module contains the session-related domain models, the transcript
//! repository interface, and the per-turn controller.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`)
//! - `message`: Conversation message types (`Sender`, `ChatMessage`)
//! - `chat_mode`: Conversational mode (`ChatMode`)
//! - `repository`: Repository trait for transcript persistence
//! - `controller`: Per-turn orchestration (`SessionController`)

mod chat_mode;
mod controller;
mod message;
mod model;
mod repository;

// Re-export public API
pub use chat_mode::ChatMode;
pub use controller::{
    SessionController, SessionState, TurnOutcome, GENERATION_FAILURE_REPLY, SPECIFY_QUERY_REPLY,
};
pub use message::{ChatMessage, Sender};
pub use model::Session;
pub use repository::TranscriptRepository;
