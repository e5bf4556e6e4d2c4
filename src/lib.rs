//! TicketLens: semantic search over an append-only ticket log.
//!
//! Tickets are validated, their descriptions embedded through a pluggable
//! [`EmbeddingProvider`], and appended to three structures that must stay in
//! lockstep: the ticket store, the vector index and the position → id
//! correlation table. [`TicketService`] owns all three behind one lock and
//! answers top-k cosine-similarity queries against them.
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use ticketlens::{HashingEmbedder, TicketService};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ticketlens::TicketError> {
//! let service = TicketService::new(Arc::new(HashingEmbedder::new(384)), Duration::from_secs(5));
//! service.create_ticket("Login broken", "Login page returns 500 on submit").await?;
//!
//! let hits = service.search("login error 500", 5).await?;
//! assert_eq!(hits[0].ticket.id, 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod store;
pub mod timestamp;

pub use config::{ConfigLoadError, ServiceConfig};
pub use error::{TicketError, TicketResult};
pub use service::{CatalogStats, SearchResult, TicketService, QUERY_MAX_CHARS};
pub use store::{Ticket, TicketDraft, TicketStore};

pub use index::{CorrelationTable, IndexError, VectorHit, VectorIndex};
pub use semantic::{
    build_provider, EmbeddingProvider, HashingEmbedder, SemanticConfig, SemanticError,
};
