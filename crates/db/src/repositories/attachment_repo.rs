//! Repository for the `attachments` table.

use moim_core::types::DbId;
use sqlx::PgPool;

use crate::models::attachment::{Attachment, CreateAttachment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, meeting_id, file_name, stored_path, content_type, size_bytes, \
                        uploaded_by, created_at, updated_at";

/// Provides CRUD operations for meeting attachments.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Insert attachment metadata after the file body has been written.
    pub async fn create(pool: &PgPool, input: &CreateAttachment) -> Result<Attachment, sqlx::Error> {
        let query = format!(
            "INSERT INTO attachments
                (meeting_id, file_name, stored_path, content_type, size_bytes, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(input.meeting_id)
            .bind(&input.file_name)
            .bind(&input.stored_path)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// Find an attachment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attachments WHERE id = $1");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List attachments on a meeting, oldest first.
    pub async fn list_by_meeting(
        pool: &PgPool,
        meeting_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attachments WHERE meeting_id = $1 ORDER BY created_at"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(meeting_id)
            .fetch_all(pool)
            .await
    }

    /// Delete attachment metadata. The caller removes the file body.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attachments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
