//! Comment entity model and DTOs.

use moim_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Entity types a comment may attach to.
pub const COMMENT_ENTITY_TYPES: &[&str] = &["project", "goal", "task", "meeting"];

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub entity_type: String,
    pub entity_id: DbId,
    pub content: String,
}

/// DTO for editing a comment's content.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComment {
    pub content: String,
}
