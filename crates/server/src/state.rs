use crate::config::ServerConfig;
use crate::error::ServerResult;
use std::sync::Arc;
use ticketlens::{ServiceConfig, TicketService};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// The ticket catalog and embedding provider
    pub service: Arc<TicketService>,

    /// `top_k` applied when a search request omits it
    pub default_top_k: usize,

    /// Largest `top_k` a search request may ask for
    pub max_top_k: usize,
}

impl ServerState {
    /// Build the ticket service described by `service_config`.
    pub fn new(config: ServerConfig, service_config: &ServiceConfig) -> ServerResult<Self> {
        let service = Arc::new(TicketService::from_config(service_config)?);
        Ok(Self::with_service(config, service, service_config))
    }

    /// Wrap an already constructed service.
    pub fn with_service(
        config: ServerConfig,
        service: Arc<TicketService>,
        service_config: &ServiceConfig,
    ) -> Self {
        Self {
            config: Arc::new(config),
            service,
            default_top_k: service_config.default_top_k,
            max_top_k: service_config.max_top_k,
        }
    }
}
