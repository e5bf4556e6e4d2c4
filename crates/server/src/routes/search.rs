use crate::error::{ServerError, ServerResult};
use crate::extract::ApiJson;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use ticketlens::SearchResult;

/// Search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text query, embedded with the same provider as ticket descriptions
    pub query: String,

    /// Number of results to return; the service default applies when omitted
    /// and values above the configured maximum are clamped to it
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// Top-k tickets whose descriptions are most similar to the query
pub async fn search_tickets(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> ServerResult<impl IntoResponse> {
    if state.service.is_empty()? {
        return Ok(Json(Vec::<SearchResult>::new()));
    }

    let top_k = request
        .top_k
        .unwrap_or(state.default_top_k)
        .min(state.max_top_k);
    if top_k == 0 {
        return Err(ServerError::Validation(
            "validation failed: top_k must be at least 1".to_string(),
        ));
    }

    let results = state.service.search(&request.query, top_k).await?;
    Ok(Json(results))
}
