//! Repository for the `meetings` table.

use moim_core::types::DbId;
use sqlx::PgPool;

use crate::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, workspace_id, title, description, meeting_type, location, \
                        start_at, end_at, attendee_ids, created_by, created_at, updated_at";

/// Provides CRUD operations for meetings.
pub struct MeetingRepo;

impl MeetingRepo {
    /// Insert a new meeting, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMeeting,
        created_by: Option<DbId>,
    ) -> Result<Meeting, sqlx::Error> {
        let query = format!(
            "INSERT INTO meetings
                (workspace_id, title, description, meeting_type, location, start_at, end_at,
                 attendee_ids, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(input.workspace_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.meeting_type)
            .bind(&input.location)
            .bind(input.start_at)
            .bind(input.end_at)
            .bind(&input.attendee_ids)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a meeting by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meetings WHERE id = $1");
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all meetings ordered by start time, soonest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Meeting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meetings ORDER BY start_at DESC");
        sqlx::query_as::<_, Meeting>(&query).fetch_all(pool).await
    }

    /// List meetings scoped to a workspace.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<Meeting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meetings WHERE workspace_id = $1 ORDER BY start_at DESC"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// Update a meeting. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMeeting,
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "UPDATE meetings SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                meeting_type = COALESCE($4, meeting_type),
                location = COALESCE($5, location),
                start_at = COALESCE($6, start_at),
                end_at = COALESCE($7, end_at),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.meeting_type)
            .bind(&input.location)
            .bind(input.start_at)
            .bind(input.end_at)
            .fetch_optional(pool)
            .await
    }

    /// Replace the attendee set wholesale.
    pub async fn set_attendees(
        pool: &PgPool,
        id: DbId,
        attendee_ids: &[DbId],
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "UPDATE meetings SET attendee_ids = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .bind(attendee_ids)
            .fetch_optional(pool)
            .await
    }

    /// Delete a meeting (attachments cascade in the schema; polymorphic
    /// comments are removed by the handler).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
