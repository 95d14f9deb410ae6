use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use colonnade_storage::error::QueryError;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unavailable(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unavailable(msg) => {
                tracing::error!("storage unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage unavailable".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::InvalidKey(_) | QueryError::InvalidArgument(_) => {
                ApiError::BadRequest(e.to_string())
            }
            QueryError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            QueryError::StorageUnavailable(source) => ApiError::Unavailable(source.to_string()),
            QueryError::CorruptRow(_) => ApiError::Internal(e.to_string()),
        }
    }
}
