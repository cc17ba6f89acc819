//! Repository for the `tasks` table.

use moim_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, goal_id, title, description, status, priority, deadline, \
                        duration_hours, progress, assignee_ids, archived_at, created_by, \
                        updated_by, created_at, updated_at";

/// Minimal projection used by the roll-up computation.
#[derive(Debug, Clone, FromRow)]
pub struct TaskProgressRow {
    pub goal_id: Option<DbId>,
    pub progress: i16,
    pub status: String,
}

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// `status` is passed explicitly because the handler derives it from
    /// the initial progress value.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTask,
        status: &str,
        created_by: Option<DbId>,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (project_id, goal_id, title, description, status, priority, deadline,
                 duration_hours, progress, assignee_ids, created_by, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(input.goal_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(status)
            .bind(&input.priority)
            .bind(input.deadline)
            .bind(input.duration_hours)
            .bind(input.progress)
            .bind(&input.assignee_ids)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID. Excludes archived rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND archived_at IS NULL");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task by ID, including archived rows.
    pub async fn find_by_id_include_archived(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live tasks under a project (both goal-owned and project-direct).
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1 AND archived_at IS NULL
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List live tasks under a goal.
    pub async fn list_by_goal(pool: &PgPool, goal_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE goal_id = $1 AND archived_at IS NULL
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(goal_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied;
    /// `status` and `progress` are passed explicitly after normalization.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
        status: &str,
        progress: i16,
        updated_by: Option<DbId>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                goal_id = COALESCE($2, goal_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = $5,
                priority = COALESCE($6, priority),
                deadline = COALESCE($7, deadline),
                duration_hours = COALESCE($8, duration_hours),
                progress = $9,
                assignee_ids = COALESCE($10, assignee_ids),
                updated_by = COALESCE($11, updated_by),
                updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(input.goal_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(status)
            .bind(&input.priority)
            .bind(input.deadline)
            .bind(input.duration_hours)
            .bind(progress)
            .bind(&input.assignee_ids)
            .bind(updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Archive a task. Returns `true` if a live row was archived.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET archived_at = NOW() WHERE id = $1 AND archived_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore an archived task. Returns `true` if a row was restored.
    ///
    /// Does not touch the parent goal's archive flag.
    pub async fn unarchive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET archived_at = NULL WHERE id = $1 AND archived_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Progress/status pairs of all live tasks under a goal.
    pub async fn progress_by_goal(
        pool: &PgPool,
        goal_id: DbId,
    ) -> Result<Vec<TaskProgressRow>, sqlx::Error> {
        sqlx::query_as::<_, TaskProgressRow>(
            "SELECT goal_id, progress, status FROM tasks
             WHERE goal_id = $1 AND archived_at IS NULL",
        )
        .bind(goal_id)
        .fetch_all(pool)
        .await
    }

    /// Progress/status pairs of all live tasks under a project, in one query.
    ///
    /// Used by the project roll-up: rows are grouped by `goal_id` in memory
    /// rather than issuing one query per goal.
    pub async fn progress_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TaskProgressRow>, sqlx::Error> {
        sqlx::query_as::<_, TaskProgressRow>(
            "SELECT goal_id, progress, status FROM tasks
             WHERE project_id = $1 AND archived_at IS NULL",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
