//! Repository for the `invitations` table.

use moim_core::types::DbId;
use sqlx::PgPool;

use crate::models::invitation::{Invitation, INVITATION_ACCEPTED, INVITATION_PENDING};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, inviter_email, invitee_email, role_id, status, token, accepted_at, \
                        created_at, updated_at";

/// Provides CRUD operations for invitations.
pub struct InvitationRepo;

impl InvitationRepo {
    /// Insert a new pending invitation with a server-generated token.
    pub async fn create(
        pool: &PgPool,
        inviter_email: &str,
        invitee_email: &str,
        role_id: DbId,
        token: &str,
    ) -> Result<Invitation, sqlx::Error> {
        let query = format!(
            "INSERT INTO invitations (inviter_email, invitee_email, role_id, token)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(inviter_email)
            .bind(invitee_email)
            .bind(role_id)
            .bind(token)
            .fetch_one(pool)
            .await
    }

    /// List all invitations, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Invitation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitations ORDER BY created_at DESC");
        sqlx::query_as::<_, Invitation>(&query).fetch_all(pool).await
    }

    /// Find an invitation by its acceptance token.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitations WHERE token = $1");
        sqlx::query_as::<_, Invitation>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Find a pending invitation for an email, if any (duplicate guard).
    pub async fn find_pending_by_email(
        pool: &PgPool,
        invitee_email: &str,
    ) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invitations WHERE invitee_email = $1 AND status = $2"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(invitee_email)
            .bind(INVITATION_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Mark an invitation accepted. Returns `true` if it was still pending.
    pub async fn mark_accepted(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE invitations
             SET status = $3, accepted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(INVITATION_PENDING)
        .bind(INVITATION_ACCEPTED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an invitation. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invitations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
