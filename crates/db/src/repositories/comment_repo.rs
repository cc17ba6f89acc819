//! Repository for the `comments` table.

use moim_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CreateComment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, entity_type, entity_id, author_id, content, created_at, updated_at";

/// Provides CRUD operations for polymorphic comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComment,
        author_id: DbId,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (entity_type, entity_id, author_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(author_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List comments on one entity, oldest first (conversation order).
    pub async fn list_by_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a comment's content. Returns `None` if the row is missing.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET content = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all comments on one entity (entity hard-delete cleanup).
    pub async fn delete_by_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE entity_type = $1 AND entity_id = $2")
            .bind(entity_type)
            .bind(entity_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
