//! Workspace entity model and DTOs.

use moim_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A workspace row from the `workspaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workspace {
    pub id: DbId,
    pub name: String,
    /// NULL once the owning account has been purged.
    pub owner_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a workspace. The owner is the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkspace {
    pub name: String,
}

/// DTO for renaming a workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWorkspace {
    pub name: Option<String>,
}
