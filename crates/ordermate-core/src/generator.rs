//! Generator boundary trait.
//!
//! The engine treats text generation as an opaque, potentially slow function
//! of a prompt. Implementations live outside the core (see the interaction
//! crate); tests substitute their own. The call is synchronous from the
//! turn's point of view: the turn does not proceed until it resolves, and no
//! timeout is enforced here. A hosting layer that needs responsiveness can
//! run the call on its own task and race a timeout without touching engine
//! logic.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling parameters passed to the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum output length in tokens.
    pub max_length: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Top-k sampling cutoff.
    pub top_k: u32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 150,
            temperature: 0.7,
            top_k: 50,
            top_p: 0.95,
        }
    }
}

/// An opaque text generator.
///
/// Assumed deterministic-enough given fixed sampling parameters, but not
/// required to be reproducible.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produces raw generated text for `prompt`.
    ///
    /// The returned text may echo the prompt; callers run it through
    /// [`crate::context::extract_response`].
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: Raw generated text
    /// - `Err(_)`: The generator was unavailable or failed
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}
