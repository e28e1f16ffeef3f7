// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
///
/// The assessment-specific variants are deliberately distinct kinds rather
/// than generic 4xx messages: clients display them differently (a closed
/// window is not the same as an already-recorded attempt).
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    AuthError(String),

    // 403 Forbidden (e.g., non-author requesting the results dashboard)
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., duplicate username)
    Conflict(String),

    /// Submission arrived after the scheduling gate closed.
    AssessmentClosed,

    /// An attempt for this (assessment, user) key already exists; the
    /// recorded result is final.
    DuplicateAttempt,

    /// The assessment has zero questions. Author-facing configuration error.
    EmptyAssessment,

    /// The atomic attempt write lost to a concurrent writer; retryable.
    PersistenceConflict,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code
/// and a stable machine-readable `kind` discriminant.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, "auth", msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            AppError::AssessmentClosed => (
                StatusCode::CONFLICT,
                "assessment_closed",
                "This assessment is closed and no longer accepts submissions".to_string(),
            ),
            AppError::DuplicateAttempt => (
                StatusCode::CONFLICT,
                "duplicate_attempt",
                "An attempt has already been recorded for this assessment; that result is final"
                    .to_string(),
            ),
            AppError::EmptyAssessment => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "empty_assessment",
                "Assessment has no questions".to_string(),
            ),
            AppError::PersistenceConflict => (
                StatusCode::CONFLICT,
                "persistence_conflict",
                "A concurrent submission is in progress, please retry".to_string(),
            ),
        };
        let body = Json(json!({
            "error": error_message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
