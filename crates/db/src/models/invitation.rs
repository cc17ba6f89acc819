//! Invitation entity model and DTOs.

use moim_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Invitation status values stored in the `status` column.
pub const INVITATION_PENDING: &str = "pending";
pub const INVITATION_ACCEPTED: &str = "accepted";

/// An invitation row from the `invitations` table.
///
/// The acceptance `token` is opaque and single-use; it is returned to the
/// inviter (and mailed to the invitee) but accepting it requires no login.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invitation {
    pub id: DbId,
    pub inviter_email: String,
    pub invitee_email: String,
    pub role_id: DbId,
    pub status: String,
    pub token: String,
    pub accepted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an invitation. The token is generated server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvitation {
    pub invitee_email: String,
    pub role_id: DbId,
}
