use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;
use ticketlens::CatalogStats;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Pin the uptime clock to router construction rather than the first request.
pub(crate) fn mark_started() {
    once_cell::sync::Lazy::force(&SERVER_START_TIME);
}

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub catalog: CatalogStats,
    pub uptime_seconds: u64,
    pub timestamp: String,
}

/// Catalog statistics endpoint
pub async fn catalog_stats(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let catalog = state.service.stats()?;

    Ok(Json(StatsResponse {
        catalog,
        uptime_seconds: uptime_seconds(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
