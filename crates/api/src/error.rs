//! HTTP error responses.
//!
//! Every failure leaving a handler becomes a JSON body of the form
//! `{"error": <message>, "code": <CODE>}` where `CODE` is a stable
//! machine-readable string the frontend can switch on.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use moim_core::error::CoreError;
use serde_json::json;

/// Error type returned by all API handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain-level error from `moim_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Database failure, classified into 404/409/500 on the way out.
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request that never reached domain validation
    /// (bad multipart, unknown entity type, unusable token).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An optional dependency (SMTP, LLM endpoint) is not configured.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Anything else; the client only sees a generic message.
    #[error("internal: {0}")]
    InternalError(String),
}

/// Handler return type.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Status code, stable error code, and client-facing message.
    fn response_parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => sqlx_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.response_parts();
        let body = json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}

fn core_parts(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "internal core error");
            internal()
        }
    }
}

/// `RowNotFound` is a 404; a unique-constraint violation on one of our
/// `uq_*` constraints is a 409. Everything else is logged and sanitized
/// to a generic 500 so driver details never reach the client.
fn sqlx_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        // Postgres 23505: unique_violation
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }

    tracing::error!(error = %err, "database error");
    internal()
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
