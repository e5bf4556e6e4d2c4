//! API route handlers
//!
//! - `health`: liveness and catalog statistics
//! - `tickets`: ticket creation and lookup
//! - `search`: semantic search over ticket descriptions

pub mod health;
pub mod search;
pub mod tickets;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// # Response
///
/// ```json
/// {
///   "name": "TicketLens",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "TicketLens",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /api/health",
            "GET /api/stats",
            "POST /api/tickets",
            "GET /api/tickets",
            "GET /api/tickets/{id}",
            "POST /api/search"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound("route not found".to_string())
}
