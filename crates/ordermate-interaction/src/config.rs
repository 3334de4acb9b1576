//! Generator configuration.
//!
//! Reads `config.toml` from the OrderMate base directory when present and
//! applies environment overrides. A missing file is not an error: the
//! defaults target a local completions endpoint.
//!
//! ```toml
//! [generator]
//! endpoint = "http://127.0.0.1:8080/v1/completions"
//! model = "dialo-medium"
//! max_length = 150
//! temperature = 0.7
//! top_k = 50
//! top_p = 0.95
//! ```

use ordermate_core::generator::GenerationParams;
use ordermate_core::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Environment override for the completions endpoint.
pub const ENDPOINT_ENV: &str = "ORDERMATE_GENERATOR_URL";
/// Environment override for the model name.
pub const MODEL_ENV: &str = "ORDERMATE_GENERATOR_MODEL";

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/v1/completions";

/// Resolved generator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Completions endpoint URL.
    pub endpoint: String,
    /// Model name sent with each request, if the endpoint wants one.
    pub model: Option<String>,
    /// Sampling parameters.
    pub params: GenerationParams,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: None,
            params: GenerationParams::default(),
        }
    }
}

/// On-disk shape of `config.toml`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    generator: GeneratorSection,
}

#[derive(Debug, Default, Deserialize)]
struct GeneratorSection {
    endpoint: Option<String>,
    model: Option<String>,
    max_length: Option<u32>,
    temperature: Option<f32>,
    top_k: Option<u32>,
    top_p: Option<f32>,
}

impl GeneratorConfig {
    /// Loads configuration from `config_file`, then applies environment
    /// overrides. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Fails only on an unreadable or unparseable config file; a file that
    /// simply is not there falls back to defaults.
    pub fn load(config_file: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();

        let path = config_file.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let file: ConfigFile = toml::from_str(&content)?;
            config.apply_file(file.generator);
            tracing::debug!(path = %path.display(), "generator config loaded");
        }

        config.apply_env();
        Ok(config)
    }

    fn apply_file(&mut self, section: GeneratorSection) {
        if let Some(endpoint) = section.endpoint {
            self.endpoint = endpoint;
        }
        if section.model.is_some() {
            self.model = section.model;
        }
        if let Some(max_length) = section.max_length {
            self.params.max_length = max_length;
        }
        if let Some(temperature) = section.temperature {
            self.params.temperature = temperature;
        }
        if let Some(top_k) = section.top_k {
            self.params.top_k = top_k;
        }
        if let Some(top_p) = section.top_p {
            self.params.top_p = top_p;
        }
    }

    fn apply_env(&mut self) {
        if let Ok(endpoint) = env::var(ENDPOINT_ENV) {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }
        if let Ok(model) = env::var(MODEL_ENV) {
            if !model.is_empty() {
                self.model = Some(model);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = GeneratorConfig::load(dir.path().join("config.toml")).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, None);
        assert_eq!(config.params, GenerationParams::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[generator]\nendpoint = \"http://gen.local/v1/completions\"\nmodel = \"dialo-medium\"\nmax_length = 200\n",
        )
        .unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.endpoint, "http://gen.local/v1/completions");
        assert_eq!(config.model.as_deref(), Some("dialo-medium"));
        assert_eq!(config.params.max_length, 200);
        // Unspecified sampling values keep their defaults.
        assert_eq!(config.params.top_k, 50);
    }

    #[test]
    fn unparseable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not toml [").unwrap();
        assert!(GeneratorConfig::load(&path).is_err());
    }
}
