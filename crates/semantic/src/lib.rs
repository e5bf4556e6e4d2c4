//! TicketLens embedding providers
//!
//! This crate turns ticket text into dense vectors for similarity search. Every
//! provider sits behind the [`EmbeddingProvider`] trait so the search service
//! never cares where vectors come from.
//!
//! Two modes are supported:
//!
//! - **Hashing mode** - Local, deterministic feature hashing. No model files,
//!   no network. The default, and what the tests run against.
//! - **API mode** - Call out to a hosted feature-extraction endpoint
//!   (Hugging Face router, OpenAI-compatible, or a custom JSON service).
//!
//! Vectors returned by either provider are L2-normalized, but consumers that
//! need unit length (the vector index does) normalize again anyway; it is
//! idempotent.
//!
//! ## Quick example
//!
//! ```
//! use semantic::{build_provider, EmbeddingProvider, SemanticConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = build_provider(&SemanticConfig::default()).unwrap();
//!     let vector = provider.embed("Login page returns 500 on submit").await.unwrap();
//!     assert_eq!(vector.len(), 384);
//! }
//! ```
//!
//! ## Env vars to know
//!
//! - `TICKETLENS_EMBEDDING_API_TOKEN` - Bearer token for API mode when no
//!   `api_auth_header` is configured.

pub mod config;
pub mod error;

mod api;
mod hashing;
mod normalize;

use std::sync::Arc;

use async_trait::async_trait;

pub use crate::api::ApiEmbedder;
pub use crate::config::SemanticConfig;
pub use crate::error::SemanticError;
pub use crate::hashing::HashingEmbedder;
pub use crate::normalize::{l2_norm, l2_normalize_in_place};

/// Maps text to a fixed-dimension vector.
///
/// Implementations must be deterministic for a given model version.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Label of the model producing the vectors.
    fn model_name(&self) -> &str;

    /// Output dimension when known ahead of the first call.
    fn dimension(&self) -> Option<usize>;

    /// Embed `text`, failing with [`SemanticError`] on malformed input or
    /// transport failure.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError>;
}

/// Build the provider selected by `cfg.mode`.
pub fn build_provider(cfg: &SemanticConfig) -> Result<Arc<dyn EmbeddingProvider>, SemanticError> {
    cfg.validate()?;
    let provider: Arc<dyn EmbeddingProvider> = match cfg.mode.as_str() {
        "api" => Arc::new(ApiEmbedder::from_config(cfg)?),
        _ => Arc::new(HashingEmbedder::from_config(cfg)),
    };
    tracing::info!(
        mode = %cfg.mode,
        model = %provider.model_name(),
        "embedding provider ready"
    );
    Ok(provider)
}
