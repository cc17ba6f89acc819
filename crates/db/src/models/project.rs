//! Project entity model and DTOs.

use moim_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub workspace_id: Option<DbId>,
    pub name: String,
    /// Human-readable short code, unique across the workspace.
    pub code: String,
    pub description: Option<String>,
    /// Korean status string (진행전 / 진행중 / 완료 / 이슈).
    pub status: String,
    pub deadline: Option<chrono::NaiveDate>,
    pub labels: Vec<String>,
    pub owner_ids: Vec<DbId>,
    pub archived_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub workspace_id: Option<DbId>,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub deadline: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub owner_ids: Vec<DbId>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<chrono::NaiveDate>,
    pub labels: Option<Vec<String>>,
    pub owner_ids: Option<Vec<DbId>>,
}
