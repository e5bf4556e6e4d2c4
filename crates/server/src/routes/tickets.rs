use crate::error::ServerResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::ServerState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

/// Request body for ticket creation
#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
}

/// Create a ticket: validate, embed the description and index it.
pub async fn create_ticket(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<CreateTicketRequest>,
) -> ServerResult<impl IntoResponse> {
    let ticket = state
        .service
        .create_ticket(request.title, request.description)
        .await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// All tickets in creation order
pub async fn list_tickets(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    Ok(Json(state.service.list_tickets()?))
}

pub async fn get_ticket(
    State(state): State<Arc<ServerState>>,
    ApiPath(id): ApiPath<u64>,
) -> ServerResult<impl IntoResponse> {
    Ok(Json(state.service.get_ticket(id)?))
}
