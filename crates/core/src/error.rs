//! Domain error type shared by the repository and HTTP layers.
//!
//! Variants correspond to the HTTP classes the API responds with; the
//! `moim-api` crate maps each one to a status code and machine-readable
//! error code.

use crate::types::DbId;

/// Errors produced by domain logic, independent of any transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A row lookup by id came back empty.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The input violates a domain rule (empty title, bad status string, ...).
    #[error("validation: {0}")]
    Validation(String),

    /// The operation is valid in general but not in the current state,
    /// e.g. completing a project with unfinished goals.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or unusable credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (role check, author-only edits).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A bug or broken invariant; details stay server-side.
    #[error("internal: {0}")]
    Internal(String),
}
