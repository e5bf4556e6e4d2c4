use serde::{Deserialize, Serialize};

use crate::SemanticError;

/// Environment variable consulted for a bearer token when `api_auth_header` is unset.
pub const API_TOKEN_ENV: &str = "TICKETLENS_EMBEDDING_API_TOKEN";

/// Runtime configuration describing which embedding provider to build.
///
/// # Example
/// ```
/// use semantic::SemanticConfig;
///
/// let cfg = SemanticConfig {
///     mode: "api".into(),
///     api_url: Some("https://router.huggingface.co/hf-inference/models/BAAI/bge-small-en-v1.5/pipeline/feature-extraction".into()),
///     api_provider: Some("hf".into()),
///     ..Default::default()
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SemanticConfig {
    /// Provider selector: `"hashing"` (local, deterministic) or `"api"` (remote HTTP).
    pub mode: String,
    /// Friendly label surfaced in stats and logs.
    pub model_name: String,
    /// Output dimension of the hashing provider. Ignored in api mode, where the
    /// remote model decides.
    pub dimension: usize,
    /// API inference endpoint when [`mode`](Self::mode) is `"api"`.
    pub api_url: Option<String>,
    /// Authorization header (e.g., `"Bearer hf_xxx"`).
    pub api_auth_header: Option<String>,
    /// Remote provider hint: `"hf"`, `"openai"`, or `"custom"` (default).
    pub api_provider: Option<String>,
    /// Transport timeout for a single API call, in seconds.
    pub api_timeout_secs: u64,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            mode: "hashing".into(),
            model_name: "feature-hashing-v1".into(),
            dimension: 384,
            api_url: None,
            api_auth_header: None,
            api_provider: None,
            api_timeout_secs: 30,
        }
    }
}

impl SemanticConfig {
    /// Reject combinations no provider can be built from.
    pub fn validate(&self) -> Result<(), SemanticError> {
        match self.mode.as_str() {
            "hashing" => {
                if self.dimension == 0 {
                    return Err(SemanticError::InvalidConfig(
                        "dimension must be greater than zero".into(),
                    ));
                }
            }
            "api" => {
                if self.api_url.as_deref().map_or(true, str::is_empty) {
                    return Err(SemanticError::InvalidConfig(
                        "api_url is required for api mode".into(),
                    ));
                }
            }
            other => {
                return Err(SemanticError::InvalidConfig(format!(
                    "unknown embedding mode '{other}' (expected 'hashing' or 'api')"
                )))
            }
        }
        Ok(())
    }

    /// Authorization header to send, falling back to [`API_TOKEN_ENV`].
    pub fn resolved_auth_header(&self) -> Option<String> {
        self.api_auth_header.clone().or_else(|| {
            std::env::var(API_TOKEN_ENV)
                .ok()
                .filter(|token| !token.is_empty())
                .map(|token| format!("Bearer {token}"))
        })
    }
}
