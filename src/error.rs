use std::time::Duration;

use index::IndexError;
use semantic::SemanticError;
use thiserror::Error;

/// Errors surfaced by the ticket store and the search service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TicketError {
    /// Input failed shape or length checks.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No ticket carries the requested identifier.
    #[error("ticket {0} not found")]
    NotFound(u64),

    /// The embedding provider rejected the text or could not be reached.
    #[error("embedding failed: {0}")]
    Embedding(#[from] SemanticError),

    /// The embedding provider did not answer within the configured budget.
    #[error("embedding timed out after {}ms", .0.as_millis())]
    EmbeddingTimeout(Duration),

    /// The store, vector index and correlation table disagree. Always a bug.
    #[error("index consistency violated: {0}")]
    IndexConsistency(String),

    /// The vector index refused a vector (dimension drift, degenerate vector).
    #[error("vector index error: {0}")]
    Index(#[from] IndexError),
}

impl TicketError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    pub fn consistency<S: Into<String>>(msg: S) -> Self {
        Self::IndexConsistency(msg.into())
    }
}

pub type TicketResult<T> = Result<T, TicketError>;
