//! YAML configuration for the ticket search service.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! embedding:
//!   mode: "hashing"
//!   model_name: "feature-hashing-v1"
//!   dimension: 384
//!
//! embed_timeout_ms: 10000
//! default_top_k: 5
//! max_top_k: 50
//! ```
//!
//! For a hosted model switch `embedding.mode` to `"api"` and set `api_url`
//! (plus `api_provider: "hf"` or `"openai"` when talking to those services).

use std::fs;
use std::path::Path;
use std::time::Duration;

use semantic::SemanticConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Service-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ServiceConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Embedding provider selection
    #[serde(default)]
    pub embedding: SemanticConfig,

    /// Upper bound on a single embedding call, in milliseconds
    #[serde(default = "default_embed_timeout_ms")]
    pub embed_timeout_ms: u64,

    /// `top_k` used when a search request omits it
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Largest `top_k` a search request may ask for
    #[serde(default = "default_max_top_k")]
    pub max_top_k: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            embedding: SemanticConfig::default(),
            embed_timeout_ms: default_embed_timeout_ms(),
            default_top_k: default_top_k(),
            max_top_k: default_max_top_k(),
        }
    }
}

impl ServiceConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ServiceConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }

        if self.embed_timeout_ms == 0 {
            return Err(ConfigLoadError::Validation(
                "embed_timeout_ms must be >= 1".into(),
            ));
        }
        if self.max_top_k == 0 {
            return Err(ConfigLoadError::Validation("max_top_k must be >= 1".into()));
        }
        if self.default_top_k == 0 || self.default_top_k > self.max_top_k {
            return Err(ConfigLoadError::Validation(format!(
                "default_top_k must be between 1 and max_top_k ({})",
                self.max_top_k
            )));
        }
        self.embedding
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;

        Ok(())
    }

    pub fn embed_timeout(&self) -> Duration {
        Duration::from_millis(self.embed_timeout_ms)
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_embed_timeout_ms() -> u64 {
    10_000
}

fn default_top_k() -> usize {
    5
}

fn default_max_top_k() -> usize {
    50
}
