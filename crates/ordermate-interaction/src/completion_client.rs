//! CompletionApiGenerator - REST client for an OpenAI-style completions
//! endpoint.
//!
//! The engine treats generation as opaque; this client is the default
//! transport, pointed at a local completions server (llama.cpp and friends
//! speak the same request shape). There are no retries and no timeout: the
//! turn blocks until the endpoint answers, which is the engine's documented
//! responsiveness limitation.

use async_trait::async_trait;
use ordermate_core::generator::{GenerationParams, Generator};
use ordermate_core::{OrdermateError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;

/// Generator implementation that talks to a completions HTTP API.
#[derive(Clone)]
pub struct CompletionApiGenerator {
    client: Client,
    endpoint: String,
    model: Option<String>,
}

impl CompletionApiGenerator {
    /// Creates a client for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: None,
        }
    }

    /// Creates a client from resolved configuration.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_k: u32,
    top_p: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

#[async_trait]
impl Generator for CompletionApiGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let request = CompletionRequest {
            model: self.model.as_deref(),
            prompt,
            max_tokens: params.max_length,
            temperature: params.temperature,
            top_k: params.top_k,
            top_p: params.top_p,
        };

        tracing::debug!(endpoint = %self.endpoint, prompt_len = prompt.len(), "generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| OrdermateError::generation(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrdermateError::generation(format!(
                "endpoint returned {}: {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| OrdermateError::generation(format!("undecodable response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| OrdermateError::generation("response contained no choices"))
    }
}
