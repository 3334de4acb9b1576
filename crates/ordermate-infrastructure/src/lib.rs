//! File-backed storage for OrderMate.
//!
//! Implementations of the engine's storage boundaries: the plain-text
//! transcript repository, the JSON order-table loader, and path
//! resolution for the on-disk layout.

pub mod order_store;
pub mod paths;
pub mod text_transcript;

#[cfg(test)]
mod test_session_round_trip;

pub use order_store::{load_order_table, order_table_from_json};
pub use paths::OrdermatePaths;
pub use text_transcript::TextTranscriptRepository;
