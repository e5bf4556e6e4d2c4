use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use ticketlens::{ConfigLoadError, IndexError, TicketError};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Embedding(String),

    #[error("{0}")]
    EmbeddingTimeout(String),

    #[error("{0}")]
    IndexConsistency(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Embedding(_) => StatusCode::BAD_GATEWAY,
            ServerError::EmbeddingTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ServerError::IndexConsistency(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Validation(_) => "VALIDATION_ERROR",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ServerError::NotFound(_) => "NOT_FOUND",
            ServerError::Embedding(_) => "EMBEDDING_ERROR",
            ServerError::EmbeddingTimeout(_) => "EMBEDDING_TIMEOUT",
            ServerError::IndexConsistency(_) => "INDEX_CONSISTENCY_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(code = error_code, %message, "request failed");
        } else {
            tracing::debug!(code = error_code, %message, "request rejected");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<TicketError> for ServerError {
    fn from(err: TicketError) -> Self {
        let message = err.to_string();
        match err {
            TicketError::Validation(_) => ServerError::Validation(message),
            TicketError::NotFound(_) => ServerError::NotFound(message),
            TicketError::Embedding(_) => ServerError::Embedding(message),
            TicketError::EmbeddingTimeout(_) => ServerError::EmbeddingTimeout(message),
            // A vector the index refuses on shape came from a misbehaving provider.
            TicketError::Index(
                IndexError::DimensionMismatch { .. } | IndexError::ZeroVector | IndexError::NonFinite,
            ) => ServerError::Embedding(message),
            TicketError::Index(_) | TicketError::IndexConsistency(_) => {
                ServerError::IndexConsistency(message)
            }
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ServerError::Validation(err.body_text()),
            JsonRejection::JsonSyntaxError(err) => ServerError::BadRequest(err.body_text()),
            JsonRejection::MissingJsonContentType(err) => ServerError::BadRequest(err.body_text()),
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ServerError::PayloadTooLarge
            }
            other => ServerError::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                ServerError::Validation(err.body_text())
            }
            other => ServerError::Internal(other.body_text()),
        }
    }
}

impl From<ConfigLoadError> for ServerError {
    fn from(err: ConfigLoadError) -> Self {
        ServerError::Config(err.to_string())
    }
}
