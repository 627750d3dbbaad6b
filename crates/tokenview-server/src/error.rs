use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tokenview_query::QueryError;
use tokenview_store::StoreError;
use tokenview_types::ValidationError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ServerError {
    fn from(e: ValidationError) -> Self {
        Self::Query(QueryError::Validation(e))
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Fixed error bodies: clients see the status class, logs see the cause.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Query(QueryError::Validation(e)) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Bad Request", "message": e.to_string() })),
            )
                .into_response(),
            ServerError::Query(QueryError::NotFound(kind)) => {
                tracing::debug!(code = kind.diagnostic_code(), "{kind} not found");
                not_found()
            }
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

pub(crate) fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" }))).into_response()
}
