use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// The faults a handler can surface. Everything user-visible goes through
/// [`IntoResponse`] below, so the wire envelope stays one of four fixed
/// translations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("requested resource not found")]
    NotFound,

    #[error("request content cannot be processed")]
    Unprocessable,

    #[error("malformed request")]
    BadRequest,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Requested resource not found!"),
            ApiError::Unprocessable => (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable!"),
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "bad request!"),
            ApiError::Database(_) | ApiError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error. Something went wrong!",
                )
            }
        };
        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": message,
        }));
        (status, body).into_response()
    }
}
