//! OrderMate session and query resolution engine.
//!
//! A dual-mode conversational assistant core: free-form chat turns go
//! through a bounded context window to an opaque [`generator::Generator`],
//! structured query turns go through the [`intent`] parser and the
//! [`orders`] resolver. Every processed turn ends with the session's full
//! transcript rewritten through its [`session::TranscriptRepository`].
//!
//! The engine is single-user and turn-based: one utterance is processed at
//! a time, start to finish, and each session's transcript has exactly one
//! writer. Rendering, generator transport, and data loading live in the
//! sibling crates.

pub mod context;
pub mod error;
pub mod generator;
pub mod intent;
pub mod orders;
pub mod session;

// Re-export common error type
pub use error::{OrdermateError, Result};
