//! Cross-entity archive queries.
//!
//! Projects, goals, and tasks share the `archived_at` soft-archive pattern;
//! this repository provides the unified archive view, purge preview, and
//! hard-delete (purge) operations that span all three tables. Restores go
//! through the entity repositories, since archive flags are independent
//! between parent and child.

use moim_core::types::DbId;
use serde::Serialize;
use sqlx::PgPool;

use crate::models::goal::Goal;
use crate::models::project::Project;
use crate::models::task::Task;

/// Entity types participating in the archive.
pub const ARCHIVE_ENTITY_TYPES: &[&str] = &["projects", "goals", "tasks"];

/// Whether `entity_type` is one of the archivable types.
pub fn is_known_entity_type(entity_type: &str) -> bool {
    ARCHIVE_ENTITY_TYPES.contains(&entity_type)
}

/// Archived rows grouped by entity type.
#[derive(Debug, Serialize)]
pub struct ArchiveSummary {
    pub projects: Vec<Project>,
    pub goals: Vec<Goal>,
    pub tasks: Vec<Task>,
}

/// Row counts that a purge-all would remove, by entity type.
#[derive(Debug, Serialize)]
pub struct PurgePreview {
    pub projects: i64,
    pub goals: i64,
    pub tasks: i64,
}

/// What happened to a single-row purge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    /// The archived row was deleted.
    Purged,
    /// No such row, or the row is live.
    NotFound,
    /// The row is archived but still has live children; deleting it would
    /// cascade onto rows the caller never asked to remove.
    Blocked,
}

/// Unified archive operations across projects, goals, and tasks.
pub struct ArchiveRepo;

impl ArchiveRepo {
    /// List archived rows, optionally filtered to one entity type.
    pub async fn list_archived(
        pool: &PgPool,
        entity_type: Option<&str>,
    ) -> Result<ArchiveSummary, sqlx::Error> {
        let want = |t: &str| entity_type.is_none() || entity_type == Some(t);

        let projects = if want("projects") {
            sqlx::query_as::<_, Project>(
                "SELECT id, workspace_id, name, code, description, status, deadline, labels,
                        owner_ids, archived_at, created_by, updated_by, created_at, updated_at
                 FROM projects WHERE archived_at IS NOT NULL ORDER BY archived_at DESC",
            )
            .fetch_all(pool)
            .await?
        } else {
            Vec::new()
        };

        let goals = if want("goals") {
            sqlx::query_as::<_, Goal>(
                "SELECT id, project_id, title, description, status, deadline, labels,
                        assignee_ids, archived_at, created_by, updated_by, created_at, updated_at
                 FROM goals WHERE archived_at IS NOT NULL ORDER BY archived_at DESC",
            )
            .fetch_all(pool)
            .await?
        } else {
            Vec::new()
        };

        let tasks = if want("tasks") {
            sqlx::query_as::<_, Task>(
                "SELECT id, project_id, goal_id, title, description, status, priority, deadline,
                        duration_hours, progress, assignee_ids, archived_at, created_by,
                        updated_by, created_at, updated_at
                 FROM tasks WHERE archived_at IS NOT NULL ORDER BY archived_at DESC",
            )
            .fetch_all(pool)
            .await?
        } else {
            Vec::new()
        };

        Ok(ArchiveSummary {
            projects,
            goals,
            tasks,
        })
    }

    /// Count the rows a purge-all would remove. Uses the same eligibility
    /// rules as [`Self::purge_all`]: archived goals and projects with live
    /// descendants are excluded, since purging them would cascade onto live
    /// rows.
    pub async fn purge_preview(pool: &PgPool) -> Result<PurgePreview, sqlx::Error> {
        let (tasks,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE archived_at IS NOT NULL")
                .fetch_one(pool)
                .await?;
        let (goals,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM goals g
             WHERE g.archived_at IS NOT NULL
               AND NOT EXISTS (SELECT 1 FROM tasks t
                               WHERE t.goal_id = g.id AND t.archived_at IS NULL)",
        )
        .fetch_one(pool)
        .await?;
        let (projects,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM projects p
             WHERE p.archived_at IS NOT NULL
               AND NOT EXISTS (SELECT 1 FROM goals g
                               WHERE g.project_id = p.id AND g.archived_at IS NULL)
               AND NOT EXISTS (SELECT 1 FROM tasks t
                               WHERE t.project_id = p.id AND t.archived_at IS NULL)",
        )
        .fetch_one(pool)
        .await?;

        Ok(PurgePreview {
            projects,
            goals,
            tasks,
        })
    }

    /// Hard-delete one archived row.
    ///
    /// Archived goals and projects with live descendants are refused
    /// ([`PurgeOutcome::Blocked`]): the schema cascades child rows on parent
    /// deletion, and a purge must never take live rows with it.
    pub async fn purge_one(
        pool: &PgPool,
        entity_type: &str,
        id: DbId,
    ) -> Result<PurgeOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (table, live_children_sql) = match entity_type {
            "projects" => (
                "projects",
                Some(
                    "SELECT EXISTS (SELECT 1 FROM goals
                                    WHERE project_id = $1 AND archived_at IS NULL)
                         OR EXISTS (SELECT 1 FROM tasks
                                    WHERE project_id = $1 AND archived_at IS NULL)",
                ),
            ),
            "goals" => (
                "goals",
                Some(
                    "SELECT EXISTS (SELECT 1 FROM tasks
                                    WHERE goal_id = $1 AND archived_at IS NULL)",
                ),
            ),
            "tasks" => ("tasks", None),
            _ => return Ok(PurgeOutcome::NotFound),
        };

        let query = format!("SELECT archived_at IS NOT NULL FROM {table} WHERE id = $1");
        let archived: Option<(bool,)> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if !matches!(archived, Some((true,))) {
            return Ok(PurgeOutcome::NotFound);
        }

        if let Some(sql) = live_children_sql {
            let (blocked,): (bool,) = sqlx::query_as(sql).bind(id).fetch_one(&mut *tx).await?;
            if blocked {
                return Ok(PurgeOutcome::Blocked);
            }
        }

        let query = format!("DELETE FROM {table} WHERE id = $1");
        sqlx::query(&query).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(PurgeOutcome::Purged)
    }

    /// Hard-delete every eligible archived row, children before parents.
    /// Archived goals and projects that still hold live rows are skipped,
    /// so the FK cascade never fires on rows the caller meant to keep.
    pub async fn purge_all(pool: &PgPool) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM tasks WHERE archived_at IS NOT NULL")
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "DELETE FROM goals g
             WHERE g.archived_at IS NOT NULL
               AND NOT EXISTS (SELECT 1 FROM tasks t
                               WHERE t.goal_id = g.id AND t.archived_at IS NULL)",
        )
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "DELETE FROM projects p
             WHERE p.archived_at IS NOT NULL
               AND NOT EXISTS (SELECT 1 FROM goals g
                               WHERE g.project_id = p.id AND g.archived_at IS NULL)
               AND NOT EXISTS (SELECT 1 FROM tasks t
                               WHERE t.project_id = p.id AND t.archived_at IS NULL)",
        )
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }
}
