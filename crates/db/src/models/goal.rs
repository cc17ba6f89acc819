//! Goal entity model and DTOs.

use moim_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A goal row from the `goals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Goal {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Korean status string (진행전 / 진행중 / 완료 / 이슈).
    pub status: String,
    pub deadline: Option<chrono::NaiveDate>,
    pub labels: Vec<String>,
    pub assignee_ids: Vec<DbId>,
    pub archived_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new goal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGoal {
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub assignee_ids: Vec<DbId>,
}

/// DTO for updating an existing goal. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGoal {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<chrono::NaiveDate>,
    pub labels: Option<Vec<String>>,
    pub assignee_ids: Option<Vec<DbId>>,
}
