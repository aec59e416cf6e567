// Error responses shared by every endpoint handler

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use banquet_contracts::FieldErrors;
use banquet_storage::StorageError;
use serde::Serialize;
use utoipa::ToSchema;

/// Body for non-field errors (missing parameter, not found, internal).
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Everything an endpoint handler can fail with. Validation failures carry
/// the field-keyed error map straight into the 400 body.
#[derive(Debug)]
pub enum ApiError {
    MissingParam(&'static str),
    BadRequest(String),
    Validation(FieldErrors),
    NotFound,
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingParam(name) => error_body(
                StatusCode::BAD_REQUEST,
                format!("{name} is required"),
            ),
            ApiError::BadRequest(message) => error_body(StatusCode::BAD_REQUEST, message),
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::NotFound => error_body(StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Internal(err) => {
                tracing::error!("request failed: {err:#}");
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        }
    }
}

fn error_body(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            // Storage-level date uniqueness surfaces as a client error.
            StorageError::DateTaken(date) => {
                ApiError::BadRequest(format!("an event is already booked for {date}"))
            }
            other => ApiError::Internal(other.into()),
        }
    }
}
