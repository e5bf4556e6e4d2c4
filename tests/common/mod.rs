//! Embedding provider doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ticketlens::{EmbeddingProvider, HashingEmbedder, SemanticError, TicketService};

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Wraps the hashing embedder and counts every call.
pub struct CountingProvider {
    inner: HashingEmbedder,
    calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: HashingEmbedder::new(384),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for CountingProvider {
    fn model_name(&self) -> &str {
        "counting"
    }

    fn dimension(&self) -> Option<usize> {
        Some(384)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed_text(text)
    }
}

/// Fails every text containing `trigger`, embeds everything else.
pub struct FailingProvider {
    inner: HashingEmbedder,
    trigger: &'static str,
}

impl FailingProvider {
    pub fn new(trigger: &'static str) -> Arc<Self> {
        Arc::new(Self {
            inner: HashingEmbedder::new(384),
            trigger,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for FailingProvider {
    fn model_name(&self) -> &str {
        "failing"
    }

    fn dimension(&self) -> Option<usize> {
        Some(384)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        if text.contains(self.trigger) {
            return Err(SemanticError::Transport("HTTP error 503: upstream down".into()));
        }
        self.inner.embed_text(text)
    }
}

/// Sleeps before embedding texts containing `trigger`.
pub struct SlowProvider {
    inner: HashingEmbedder,
    trigger: &'static str,
    delay: Duration,
}

impl SlowProvider {
    pub fn new(trigger: &'static str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: HashingEmbedder::new(384),
            trigger,
            delay,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for SlowProvider {
    fn model_name(&self) -> &str {
        "slow"
    }

    fn dimension(&self) -> Option<usize> {
        Some(384)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        if text.contains(self.trigger) {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.embed_text(text)
    }
}

pub fn hashing_service() -> TicketService {
    TicketService::new(Arc::new(HashingEmbedder::new(384)), TIMEOUT)
}

pub fn assert_lockstep(service: &TicketService) {
    let stats = service.stats().expect("stats");
    assert_eq!(stats.tickets, stats.indexed_vectors);
    assert_eq!(stats.indexed_vectors, stats.correlation_entries);
}
