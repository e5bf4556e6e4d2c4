use thiserror::Error;

/// Errors surfaced by embedding providers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SemanticError {
    /// The text carries nothing the provider can embed (e.g. only whitespace).
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// Configuration is inconsistent (e.g., api mode without an endpoint).
    #[error("invalid semantic config: {0}")]
    InvalidConfig(String),
    /// The remote endpoint could not be reached or answered with a non-2xx status.
    #[error("embedding request failed: {0}")]
    Transport(String),
    /// The provider answered but the payload could not be turned into a vector.
    #[error("inference failure: {0}")]
    Inference(String),
}
