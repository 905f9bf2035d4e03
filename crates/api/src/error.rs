use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use sharepad_core::error::CoreError;
use sharepad_db::repositories::RoomOpError;
use sharepad_db::store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for the
/// persistence boundary. Implements [`IntoResponse`] to produce
/// consistent JSON error responses; every operation resolves to either a
/// success payload or one structured error, never a partial result.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sharepad_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store-level error from `sharepad_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RoomOpError> for AppError {
    fn from(err: RoomOpError) -> Self {
        match err {
            RoomOpError::Core(core) => Self::Core(core),
            RoomOpError::Store(store) => Self::Store(store),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => {
                let (status, code) = match core {
                    CoreError::RoomNotFound(_) => (StatusCode::NOT_FOUND, "ROOM_NOT_FOUND"),
                    CoreError::RoomCreationFailed { .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "ROOM_CREATION_FAILED")
                    }
                    CoreError::NotebookNotFound(_) => {
                        (StatusCode::NOT_FOUND, "NOTEBOOK_NOT_FOUND")
                    }
                    CoreError::NotebookNameExists(_) => {
                        (StatusCode::CONFLICT, "NOTEBOOK_NAME_EXISTS")
                    }
                    CoreError::CannotDeleteLastNotebook => {
                        (StatusCode::CONFLICT, "CANNOT_DELETE_LAST_NOTEBOOK")
                    }
                    CoreError::InvalidUsername(_) => (StatusCode::BAD_REQUEST, "INVALID_USERNAME"),
                };
                (status, code, core.to_string())
            }

            // --- Store errors ---
            AppError::Store(store) => classify_store_error(store),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `Unavailable` is the transient class: 429 so polling clients back
///   off and retry instead of treating it as permanent failure.
/// - `Database` and `Corrupt` map to 500 with a sanitized message; the
///   detail only goes to the log.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Unavailable(detail) => {
            tracing::warn!(error = %detail, "Document store unavailable");
            (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "The service is temporarily overloaded. Please retry shortly.".to_string(),
            )
        }
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        StoreError::Corrupt(json_err) => {
            tracing::error!(error = %json_err, "Corrupt room document");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
