//! Repository for the `activities` audit feed.

use moim_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{Activity, RecordActivity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, actor_id, entity_type, entity_id, action, detail, created_at, updated_at";

/// Hard ceiling on a single page of the activity feed.
const MAX_LIMIT: i64 = 200;

/// Default page size when the client does not specify one.
const DEFAULT_LIMIT: i64 = 50;

/// Append-only store of mutation records.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Record one activity row. Failures are the caller's to log; activity
    /// recording never blocks the mutation it describes.
    pub async fn record(pool: &PgPool, input: &RecordActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (project_id, actor_id, entity_type, entity_id, action, detail)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.project_id)
            .bind(input.actor_id)
            .bind(input.entity_type)
            .bind(input.entity_id)
            .bind(input.action)
            .bind(&input.detail)
            .fetch_one(pool)
            .await
    }

    /// List activities, newest first, optionally scoped to one project.
    pub async fn list(
        pool: &PgPool,
        project_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {COLUMNS} FROM activities
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
