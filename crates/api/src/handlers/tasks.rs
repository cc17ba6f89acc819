//! Handlers for the `/tasks` resource.
//!
//! Task status is never written directly by clients: it is derived from
//! `progress` on every write (0 ⇒ 진행전, 100 ⇒ 완료, else 진행중). The only
//! exception is the manual 이슈 flag, toggled via `flag_issue`. Every
//! mutation recomputes the parent goal and project statuses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use moim_core::error::CoreError;
use moim_core::labels::validate_progress;
use moim_core::priority::{is_valid_priority, priority_label};
use moim_core::progress::status_for_progress;
use moim_core::status::Status;
use moim_core::types::DbId;
use moim_db::models::activity::RecordActivity;
use moim_db::models::task::{CreateTask, Task, UpdateTask};
use moim_db::repositories::{GoalRepo, ProjectRepo, TaskRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{activities, rollup};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// A task with its display-ready D-day string and resolved priority label.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    #[serde(flatten)]
    pub task: Task,
    /// "-", "D-Day", "D-{n}", or "D+{n}" relative to today.
    pub dday: String,
    /// 높음 / 중요 / 보통 / 낮음 / 미정, resolved from either priority scheme.
    pub priority_label: &'static str,
}

impl TaskResponse {
    fn from_task(task: Task) -> Self {
        let dday = moim_core::dday::format_dday(Utc::now().date_naive(), task.deadline);
        let priority_label = priority_label(task.priority.as_deref());
        Self {
            task,
            dday,
            priority_label,
        }
    }
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task title must not be empty".into(),
        )));
    }
    validate_progress(input.progress)?;
    validate_priority(input.priority.as_deref())?;

    // Parent project must exist and be live.
    if ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "project",
            id: input.project_id,
        }));
    }

    // If attached to a goal, the goal must be live and belong to the project.
    if let Some(goal_id) = input.goal_id {
        let goal = GoalRepo::find_by_id(&state.pool, goal_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "goal",
                    id: goal_id,
                })
            })?;
        if goal.project_id != input.project_id {
            return Err(AppError::Core(CoreError::Validation(
                "Goal belongs to a different project".into(),
            )));
        }
    }

    let status = status_for_progress(input.progress);
    let task = TaskRepo::create(&state.pool, &input, status.as_str(), Some(user.user_id)).await?;

    rollup::recompute_task_parents(&state.pool, task.project_id, task.goal_id).await?;

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(task.project_id),
            actor_id: Some(user.user_id),
            entity_type: "task",
            entity_id: task.id,
            action: "created",
            detail: Some(task.title.clone()),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(TaskResponse::from_task(task))))
}

/// GET /api/v1/tasks/{id}
pub async fn get(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskResponse>> {
    let task = find_live(&state, id).await?;
    Ok(Json(TaskResponse::from_task(task)))
}

/// PUT /api/v1/tasks/{id}
///
/// Partial update. `progress` and `flag_issue` drive the stored status:
/// - `flag_issue: true` forces 이슈;
/// - `flag_issue: false` clears it back to the progress-derived status;
/// - otherwise an existing 이슈 survives until `progress` is changed.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<TaskResponse>> {
    let existing = find_live(&state, id).await?;

    if let Some(progress) = input.progress {
        validate_progress(progress)?;
    }
    validate_priority(input.priority.as_deref())?;

    // If the task is moving to another goal, that goal must be live and in
    // the same project.
    if let Some(goal_id) = input.goal_id {
        let goal = GoalRepo::find_by_id(&state.pool, goal_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "goal",
                    id: goal_id,
                })
            })?;
        if goal.project_id != existing.project_id {
            return Err(AppError::Core(CoreError::Validation(
                "Goal belongs to a different project".into(),
            )));
        }
    }

    let progress = input.progress.unwrap_or(existing.progress);
    let derived = status_for_progress(progress);
    let status = match input.flag_issue {
        Some(true) => Status::Issue,
        Some(false) => derived,
        None => {
            // An existing 이슈 flag survives edits that do not touch progress.
            if Status::parse(&existing.status) == Some(Status::Issue) && input.progress.is_none() {
                Status::Issue
            } else {
                derived
            }
        }
    };

    let task = TaskRepo::update(
        &state.pool,
        id,
        &input,
        status.as_str(),
        progress,
        Some(user.user_id),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "task",
            id,
        })
    })?;

    // Recompute the old goal too when the task moved between goals.
    if existing.goal_id != task.goal_id {
        if let Some(old_goal_id) = existing.goal_id {
            rollup::recompute_goal(&state.pool, old_goal_id).await?;
        }
    }
    rollup::recompute_task_parents(&state.pool, task.project_id, task.goal_id).await?;

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(task.project_id),
            actor_id: Some(user.user_id),
            entity_type: "task",
            entity_id: task.id,
            action: if status == Status::Complete {
                "completed"
            } else {
                "updated"
            },
            detail: None,
        },
    )
    .await;

    Ok(Json(TaskResponse::from_task(task)))
}

/// DELETE /api/v1/tasks/{id}
///
/// Soft-archive. Parent statuses are recomputed without the archived task.
pub async fn archive(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let task = find_live(&state, id).await?;

    if !TaskRepo::archive(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "task",
            id,
        }));
    }

    rollup::recompute_task_parents(&state.pool, task.project_id, task.goal_id).await?;

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(task.project_id),
            actor_id: Some(user.user_id),
            entity_type: "task",
            entity_id: id,
            action: "archived",
            detail: None,
        },
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/tasks/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskResponse>> {
    if !TaskRepo::unarchive(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "archived task",
            id,
        }));
    }

    let task = find_live(&state, id).await?;
    rollup::recompute_task_parents(&state.pool, task.project_id, task.goal_id).await?;

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(task.project_id),
            actor_id: Some(user.user_id),
            entity_type: "task",
            entity_id: id,
            action: "restored",
            detail: None,
        },
    )
    .await;

    Ok(Json(TaskResponse::from_task(task)))
}

/// Validate a priority input against both accepted schemes.
fn validate_priority(raw: Option<&str>) -> AppResult<()> {
    if let Some(raw) = raw {
        if !is_valid_priority(raw) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown priority '{raw}'"
            ))));
        }
    }
    Ok(())
}

/// Fetch a live task or return 404.
async fn find_live(state: &AppState, id: DbId) -> AppResult<Task> {
    TaskRepo::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "task",
            id,
        })
    })
}
