//! Refresh-token session model.

use moim_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// Only the SHA-256 hash of the refresh token is stored; the plaintext is
/// handed to the client once and never persisted.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
