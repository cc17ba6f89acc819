//! Server-side progress/status roll-up shared by the task, goal, and project
//! handlers.
//!
//! Every task mutation calls [`recompute_goal`] and [`recompute_project`] so
//! parent statuses are always derived from persisted child state. Clients
//! never write parent statuses directly except through the gated 완료
//! transition and the manual 이슈 flag, both of which recomputation preserves.

use moim_core::progress::{self, ChildProgress};
use moim_core::status::Status;
use moim_core::types::DbId;
use moim_db::repositories::{GoalRepo, TaskRepo};
use moim_db::DbPool;

use crate::error::AppResult;

/// Convert a stored (progress, status) pair into a roll-up child.
///
/// Unknown status strings from legacy data are read as 진행전 rather than
/// failing the whole aggregate.
fn child_from_row(progress: i16, status: &str) -> ChildProgress {
    ChildProgress {
        progress,
        status: Status::parse(status).unwrap_or(Status::Pending),
    }
}

/// Roll-up children of a goal: its live tasks.
pub async fn goal_children(pool: &DbPool, goal_id: DbId) -> AppResult<Vec<ChildProgress>> {
    let rows = TaskRepo::progress_by_goal(pool, goal_id).await?;
    Ok(rows
        .iter()
        .map(|r| child_from_row(r.progress, &r.status))
        .collect())
}

/// Roll-up children of a project: one entry per live goal (carrying the
/// goal's task percentage and stored status) plus each project-direct task.
///
/// Fetches all task rows for the project in a single query and groups them
/// by `goal_id` in memory.
pub async fn project_children(pool: &DbPool, project_id: DbId) -> AppResult<Vec<ChildProgress>> {
    let goals = GoalRepo::list_by_project(pool, project_id).await?;
    let task_rows = TaskRepo::progress_by_project(pool, project_id).await?;

    let mut children = Vec::with_capacity(goals.len());
    for goal in &goals {
        let tasks: Vec<ChildProgress> = task_rows
            .iter()
            .filter(|r| r.goal_id == Some(goal.id))
            .map(|r| child_from_row(r.progress, &r.status))
            .collect();

        let status = Status::parse(&goal.status).unwrap_or(Status::Pending);
        let percentage = if tasks.is_empty() {
            // A goal with no tasks contributes its stored status only:
            // 100 when manually completed, 0 otherwise.
            if status == Status::Complete {
                100
            } else {
                0
            }
        } else {
            progress::progress_percentage(&tasks)
        };

        children.push(ChildProgress {
            progress: i16::from(percentage),
            status,
        });
    }

    // Tasks attached directly to the project count as children of their own.
    for row in task_rows.iter().filter(|r| r.goal_id.is_none()) {
        children.push(child_from_row(row.progress, &row.status));
    }

    Ok(children)
}

/// Recompute and persist a goal's status from its live tasks.
///
/// Preserved overrides:
/// - a manually flagged 이슈 status stays until cleared by hand;
/// - a goal with zero tasks keeps whatever status it has (zero-task goals
///   may be completed manually and recomputation must not undo that).
pub async fn recompute_goal(pool: &DbPool, goal_id: DbId) -> AppResult<()> {
    let Some(goal) = GoalRepo::find_by_id(pool, goal_id).await? else {
        return Ok(()); // archived or deleted mid-flight; nothing to update
    };

    if Status::parse(&goal.status) == Some(Status::Issue) {
        return Ok(());
    }

    let children = goal_children(pool, goal_id).await?;
    if children.is_empty() {
        return Ok(());
    }

    let rolled = progress::rollup_status(&children);
    if rolled.as_str() != goal.status {
        GoalRepo::set_status(pool, goal_id, rolled.as_str()).await?;
        tracing::debug!(goal_id, status = %rolled, "Goal status rolled up");
    }
    Ok(())
}

/// Recompute and persist a project's status from its goals and direct tasks.
///
/// A manually flagged 이슈 status is preserved. A project with no children
/// keeps its stored status.
pub async fn recompute_project(pool: &DbPool, project_id: DbId) -> AppResult<()> {
    let Some(project) =
        moim_db::repositories::ProjectRepo::find_by_id(pool, project_id).await?
    else {
        return Ok(());
    };

    if Status::parse(&project.status) == Some(Status::Issue) {
        return Ok(());
    }

    let children = project_children(pool, project_id).await?;
    if children.is_empty() {
        return Ok(());
    }

    let rolled = progress::rollup_status(&children);
    if rolled.as_str() != project.status {
        moim_db::repositories::ProjectRepo::set_status(pool, project_id, rolled.as_str()).await?;
        tracing::debug!(project_id, status = %rolled, "Project status rolled up");
    }
    Ok(())
}

/// Recompute the full parent chain of a task: its goal (if any), then its
/// project. Call after any task create/update/archive/restore.
pub async fn recompute_task_parents(
    pool: &DbPool,
    project_id: DbId,
    goal_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(goal_id) = goal_id {
        recompute_goal(pool, goal_id).await?;
    }
    recompute_project(pool, project_id).await
}
