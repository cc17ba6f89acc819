//! Repository for the `roles` table.

use moim_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Read access to the seeded roles (관리자, 팀원).
pub struct RoleRepo;

impl RoleRepo {
    /// List all roles.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Find a role by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (e.g. 관리자).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a role id to its name, falling back to "unknown" for stale ids.
    pub async fn resolve_name(pool: &PgPool, id: DbId) -> Result<String, sqlx::Error> {
        let name: Option<(String,)> = sqlx::query_as("SELECT name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(name.map(|(n,)| n).unwrap_or_else(|| "unknown".to_string()))
    }
}
