//! Repository for the `goals` table.

use moim_core::types::DbId;
use sqlx::PgPool;

use crate::models::goal::{CreateGoal, Goal, UpdateGoal};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, status, deadline, labels, \
                        assignee_ids, archived_at, created_by, updated_by, created_at, updated_at";

/// Provides CRUD operations for goals.
pub struct GoalRepo;

impl GoalRepo {
    /// Insert a new goal, returning the created row. Status starts 진행전.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGoal,
        created_by: Option<DbId>,
    ) -> Result<Goal, sqlx::Error> {
        let query = format!(
            "INSERT INTO goals
                (project_id, title, description, deadline, labels, assignee_ids,
                 created_by, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.deadline)
            .bind(&input.labels)
            .bind(&input.assignee_ids)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a goal by ID. Excludes archived rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goals WHERE id = $1 AND archived_at IS NULL");
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a goal by ID, including archived rows.
    pub async fn find_by_id_include_archived(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goals WHERE id = $1");
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live goals under a project, oldest first (stable list order).
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Goal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM goals
             WHERE project_id = $1 AND archived_at IS NULL
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a goal. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGoal,
        updated_by: Option<DbId>,
    ) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!(
            "UPDATE goals SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                deadline = COALESCE($5, deadline),
                labels = COALESCE($6, labels),
                assignee_ids = COALESCE($7, assignee_ids),
                updated_by = COALESCE($8, updated_by),
                updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.deadline)
            .bind(&input.labels)
            .bind(&input.assignee_ids)
            .bind(updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite only the status column (roll-up recomputation).
    pub async fn set_status(pool: &PgPool, id: DbId, status: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE goals SET status = $2, updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL",
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Archive a goal. Returns `true` if a live row was archived.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE goals SET archived_at = NOW() WHERE id = $1 AND archived_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore an archived goal. Returns `true` if a row was restored.
    pub async fn unarchive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE goals SET archived_at = NULL WHERE id = $1 AND archived_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
