//! TicketLens Server - HTTP REST API for semantic ticket search
//!
//! Exposes a [`ticketlens::TicketService`] over JSON endpoints. One service
//! instance is built at startup and shared by every handler through axum
//! `State`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/health` - Liveness probe
//! - `GET /api/stats` - Catalog sizes and embedding model
//! - `POST /api/tickets` - Create a ticket
//! - `GET /api/tickets` - List tickets in creation order
//! - `GET /api/tickets/{id}` - Fetch one ticket
//! - `POST /api/search` - Top-k semantic search over ticket descriptions
//!
//! Every failure is answered with `{"error": {"code": "...", "message": "..."}}`.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
