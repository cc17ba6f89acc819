//! Repository for the `projects` table.

use moim_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, workspace_id, name, code, description, status, deadline, labels, \
                        owner_ids, archived_at, created_by, updated_by, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row. Status starts 진행전.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        created_by: Option<DbId>,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (workspace_id, name, code, description, deadline, labels, owner_ids,
                 created_by, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.workspace_id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.description)
            .bind(input.deadline)
            .bind(&input.labels)
            .bind(&input.owner_ids)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID. Excludes archived rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND archived_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by ID, including archived rows.
    pub async fn find_by_id_include_archived(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live projects, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE archived_at IS NULL ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List live projects scoped to a workspace, newest first.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE workspace_id = $1 AND archived_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists. The 완료
    /// gate is enforced by the handler before calling this.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
        updated_by: Option<DbId>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                deadline = COALESCE($6, deadline),
                labels = COALESCE($7, labels),
                owner_ids = COALESCE($8, owner_ids),
                updated_by = COALESCE($9, updated_by),
                updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.deadline)
            .bind(&input.labels)
            .bind(&input.owner_ids)
            .bind(updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite only the status column (roll-up recomputation).
    pub async fn set_status(pool: &PgPool, id: DbId, status: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE projects SET status = $2, updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL",
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Archive a project. Returns `true` if a live row was archived.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET archived_at = NOW() WHERE id = $1 AND archived_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore an archived project. Returns `true` if a row was restored.
    ///
    /// Does not touch child goals/tasks: archive flags are independent.
    pub async fn unarchive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET archived_at = NULL WHERE id = $1 AND archived_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
