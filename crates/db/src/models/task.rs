//! Task entity model and DTOs.

use moim_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    /// `None` for project-direct tasks.
    pub goal_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    /// Korean status string (진행전 / 진행중 / 완료 / 이슈).
    pub status: String,
    /// Raw priority in either scheme (legacy 높음/중간/낮음 or "1".."4").
    pub priority: Option<String>,
    pub deadline: Option<chrono::NaiveDate>,
    pub duration_hours: Option<i32>,
    /// 0..=100 in steps of 10. Kept consistent with `status` on write.
    pub progress: i16,
    pub assignee_ids: Vec<DbId>,
    pub archived_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub project_id: DbId,
    pub goal_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<chrono::NaiveDate>,
    pub duration_hours: Option<i32>,
    #[serde(default)]
    pub progress: i16,
    #[serde(default)]
    pub assignee_ids: Vec<DbId>,
}

/// DTO for updating an existing task. All fields are optional.
///
/// `status` is intentionally absent: task status is derived from `progress`
/// on every write (0 ⇒ 진행전, 100 ⇒ 완료, else 진행중), except for the
/// manual 이슈 flag toggled via `flag_issue`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub goal_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<chrono::NaiveDate>,
    pub duration_hours: Option<i32>,
    pub progress: Option<i16>,
    pub assignee_ids: Option<Vec<DbId>>,
    /// Set or clear the manual 이슈 status.
    pub flag_issue: Option<bool>,
}
