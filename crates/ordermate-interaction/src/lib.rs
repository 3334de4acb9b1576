//! Generator boundary implementations for OrderMate.
//!
//! The engine's [`ordermate_core::generator::Generator`] trait is
//! implemented here against an OpenAI-style completions endpoint, with
//! configuration resolved from `config.toml` and environment overrides.

pub mod completion_client;
pub mod config;

pub use completion_client::CompletionApiGenerator;
pub use config::GeneratorConfig;
