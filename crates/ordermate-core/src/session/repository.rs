//! Transcript repository trait.
//!
//! Defines the interface for transcript persistence operations.

use super::message::ChatMessage;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for persisting session transcripts.
///
/// This trait decouples the engine from the specific storage mechanism.
/// The contract is a full round trip: a persisted message sequence must load
/// back as an identical sequence of `(sender, content, timestamp)` triples.
///
/// # Implementation Notes
///
/// `persist` replaces the stored transcript with the given sequence on every
/// call (a full rewrite, not an append). That is O(transcript size) per
/// turn, which is acceptable for single-user bounded sessions and is the
/// documented scaling limitation of this storage model.
#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    /// Replaces the stored transcript for `storage_key` with `messages`.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Transcript saved successfully
    /// - `Err(_)`: Error occurred during save
    async fn persist(&self, storage_key: &str, messages: &[ChatMessage]) -> Result<()>;

    /// Loads the transcript stored under `storage_key`.
    ///
    /// A missing transcript is an empty history, not an error. A stored line
    /// that cannot be parsed is a data-integrity fault: the load fails with
    /// [`crate::OrdermateError::MalformedTranscriptLine`] instead of
    /// skipping or guessing content.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ChatMessage>)`: The stored messages, in order
    /// - `Err(_)`: Corrupt transcript or storage failure
    async fn load(&self, storage_key: &str) -> Result<Vec<ChatMessage>>;

    /// Lists the storage keys of all persisted transcripts.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<String>)`: Storage keys, sorted
    /// - `Err(_)`: Error occurred during listing
    async fn list(&self) -> Result<Vec<String>>;
}
