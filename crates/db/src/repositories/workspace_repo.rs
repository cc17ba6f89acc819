//! Repository for the `workspaces` table.

use moim_core::types::DbId;
use sqlx::PgPool;

use crate::models::workspace::{CreateWorkspace, UpdateWorkspace, Workspace};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, owner_id, created_at, updated_at";

/// Provides CRUD operations for workspaces.
pub struct WorkspaceRepo;

impl WorkspaceRepo {
    /// Insert a new workspace owned by the caller.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWorkspace,
        owner_id: DbId,
    ) -> Result<Workspace, sqlx::Error> {
        let query = format!(
            "INSERT INTO workspaces (name, owner_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(&input.name)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find a workspace by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE id = $1");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all workspaces, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces ORDER BY created_at");
        sqlx::query_as::<_, Workspace>(&query).fetch_all(pool).await
    }

    /// Rename a workspace. Returns `None` if the row is missing.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkspace,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!(
            "UPDATE workspaces SET name = COALESCE($2, name), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a workspace. Scoped projects/meetings fall back to the global
    /// scope (FK is ON DELETE SET NULL); admin-only at the handler level.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
