use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

/// Failure taxonomy for the HTTP surface.
///
/// Validation problems are detected before any persistence call and map to
/// 400; missing rows map to 404; everything the driver throws maps to 500
/// with the underlying message surfaced in the envelope.
#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),
}

impl ApiError {
    pub fn validation(reason: impl Into<String>) -> Self {
        ApiError::Validation(reason.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(reason) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": reason })),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "message": "internal server error",
                        "error": e.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
