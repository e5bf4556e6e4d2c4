//! Ticket ingestion and semantic search over one consistent catalog.
//!
//! The ticket log, the vector index and the correlation table live together in
//! a [`Catalog`] behind a single `RwLock`. Creation embeds first (no lock held
//! across the provider call) and then applies the three appends in one write
//! critical section; readers share the lock and therefore never see a catalog
//! in which the three structures disagree on their length.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use index::{CorrelationTable, VectorIndex};
use semantic::{build_provider, l2_normalize_in_place, EmbeddingProvider};
use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;
use crate::error::{TicketError, TicketResult};
use crate::store::{Ticket, TicketDraft, TicketStore, DESCRIPTION_MAX_CHARS};

/// Longest query text accepted by [`TicketService::search`].
pub const QUERY_MAX_CHARS: usize = DESCRIPTION_MAX_CHARS;

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub ticket: Ticket,
    /// Cosine similarity in `[-1, 1]`.
    pub score: f32,
}

/// Point-in-time sizes of the catalog structures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub tickets: usize,
    pub indexed_vectors: usize,
    pub correlation_entries: usize,
    pub dimension: Option<usize>,
    pub model: String,
}

#[derive(Debug, Default)]
struct Catalog {
    store: TicketStore,
    vectors: VectorIndex,
    positions: CorrelationTable,
}

impl Catalog {
    fn with_dimension(dimension: Option<usize>) -> Self {
        Self {
            store: TicketStore::new(),
            vectors: dimension.map_or_else(VectorIndex::new, VectorIndex::with_dimension),
            positions: CorrelationTable::new(),
        }
    }

    fn check_consistency(&self) -> TicketResult<()> {
        let (tickets, vectors, positions) =
            (self.store.len(), self.vectors.len(), self.positions.len());
        if tickets != vectors || vectors != positions {
            tracing::error!(
                tickets,
                vectors,
                positions,
                "catalog structures out of lockstep"
            );
            return Err(TicketError::consistency(format!(
                "store has {tickets} tickets, index {vectors} vectors, correlation table {positions} entries"
            )));
        }
        Ok(())
    }

    /// Index and correlation table must agree row for row; a gap here would
    /// map hits to the wrong tickets.
    fn check_index_lockstep(&self) -> TicketResult<()> {
        let (vectors, positions) = (self.vectors.len(), self.positions.len());
        if vectors != positions {
            tracing::error!(vectors, positions, "vector index and correlation table diverged");
            return Err(TicketError::consistency(format!(
                "index has {vectors} vectors, correlation table {positions} entries"
            )));
        }
        Ok(())
    }

    /// Store, index and correlation appends, all three or none.
    fn insert(&mut self, draft: TicketDraft, vector: Vec<f32>) -> TicketResult<Ticket> {
        self.check_consistency()?;
        self.vectors.check(&vector)?;

        let ticket = self.store.append(draft);
        let position = match self.vectors.add(vector) {
            Ok(position) => position,
            Err(err) => {
                self.store.truncate(self.positions.len());
                tracing::error!(ticket_id = ticket.id, error = %err, "vector rejected after validation");
                return Err(TicketError::consistency(format!(
                    "vector index rejected a validated vector: {err}"
                )));
            }
        };
        let mapped = self.positions.append(ticket.id);
        debug_assert_eq!(position, mapped);

        Ok(ticket)
    }
}

/// The ticket search service: owns the catalog and the embedding provider.
pub struct TicketService {
    catalog: RwLock<Catalog>,
    provider: Arc<dyn EmbeddingProvider>,
    embed_timeout: Duration,
}

impl TicketService {
    /// Build a service around an existing provider.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, embed_timeout: Duration) -> Self {
        Self {
            catalog: RwLock::new(Catalog::with_dimension(provider.dimension())),
            provider,
            embed_timeout,
        }
    }

    /// Build the provider described by `cfg.embedding` and wrap it.
    pub fn from_config(cfg: &ServiceConfig) -> TicketResult<Self> {
        let provider = build_provider(&cfg.embedding)?;
        Ok(Self::new(provider, cfg.embed_timeout()))
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Validate, embed and append a new ticket.
    ///
    /// Nothing is mutated unless the embedding succeeds and the vector is
    /// accepted by the index.
    pub async fn create_ticket(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> TicketResult<Ticket> {
        let draft = TicketDraft::new(title, description)?;
        let vector = self.embed(draft.description()).await?;

        let ticket = self.write()?.insert(draft, vector)?;
        tracing::info!(ticket_id = ticket.id, "ticket created");
        Ok(ticket)
    }

    pub fn get_ticket(&self, id: u64) -> TicketResult<Ticket> {
        self.read()?.store.get(id)
    }

    /// All tickets in creation order.
    pub fn list_tickets(&self) -> TicketResult<Vec<Ticket>> {
        Ok(self.read()?.store.list())
    }

    /// Top-k tickets by cosine similarity between `query` and their descriptions.
    pub async fn search(&self, query: &str, top_k: usize) -> TicketResult<Vec<SearchResult>> {
        if self.is_empty()? {
            return Ok(Vec::new());
        }
        validate_query(query)?;

        let vector = self.embed(query).await?;

        let catalog = self.read()?;
        catalog.check_index_lockstep()?;
        let hits = catalog.vectors.search(&vector, top_k)?;

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            let resolved = catalog
                .positions
                .resolve(hit.position)
                .map_err(TicketError::from)
                .and_then(|id| catalog.store.get(id));
            match resolved {
                Ok(ticket) => results.push(SearchResult {
                    ticket,
                    score: hit.score,
                }),
                Err(err) => {
                    tracing::error!(
                        position = hit.position,
                        error = %err,
                        "search hit does not resolve to a ticket, skipping"
                    );
                }
            }
        }

        tracing::debug!(top_k, hits = results.len(), "search complete");
        Ok(results)
    }

    /// True until the first ticket is created.
    pub fn is_empty(&self) -> TicketResult<bool> {
        Ok(self.read()?.store.is_empty())
    }

    pub fn stats(&self) -> TicketResult<CatalogStats> {
        let catalog = self.read()?;
        Ok(CatalogStats {
            tickets: catalog.store.len(),
            indexed_vectors: catalog.vectors.len(),
            correlation_entries: catalog.positions.len(),
            dimension: catalog.vectors.dimension(),
            model: self.provider.model_name().to_string(),
        })
    }

    async fn embed(&self, text: &str) -> TicketResult<Vec<f32>> {
        let started = Instant::now();
        let mut vector = tokio::time::timeout(self.embed_timeout, self.provider.embed(text))
            .await
            .map_err(|_| {
                tracing::warn!(
                    timeout_ms = self.embed_timeout.as_millis() as u64,
                    "embedding provider timed out"
                );
                TicketError::EmbeddingTimeout(self.embed_timeout)
            })??;
        l2_normalize_in_place(&mut vector);

        tracing::debug!(
            dim = vector.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "text embedded"
        );
        Ok(vector)
    }

    fn read(&self) -> TicketResult<RwLockReadGuard<'_, Catalog>> {
        self.catalog
            .read()
            .map_err(|_| TicketError::consistency("catalog lock poisoned"))
    }

    fn write(&self) -> TicketResult<RwLockWriteGuard<'_, Catalog>> {
        self.catalog
            .write()
            .map_err(|_| TicketError::consistency("catalog lock poisoned"))
    }
}

fn validate_query(query: &str) -> TicketResult<()> {
    if query.trim().is_empty() {
        return Err(TicketError::validation("query must not be blank"));
    }
    let len = query.chars().count();
    if len > QUERY_MAX_CHARS {
        return Err(TicketError::validation(format!(
            "query must be at most {QUERY_MAX_CHARS} characters (got {len})"
        )));
    }
    Ok(())
}
