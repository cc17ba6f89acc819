//! Handlers for the `/goals` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use moim_core::error::CoreError;
use moim_core::labels::validate_labels;
use moim_core::progress::{self, Rollup};
use moim_core::status::Status;
use moim_core::types::DbId;
use moim_db::models::activity::RecordActivity;
use moim_db::models::goal::{CreateGoal, Goal, UpdateGoal};
use moim_db::models::task::Task;
use moim_db::repositories::{GoalRepo, ProjectRepo, TaskRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{activities, rollup};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// A goal together with its display-ready D-day string.
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    #[serde(flatten)]
    pub goal: Goal,
    /// "-", "D-Day", "D-{n}", or "D+{n}" relative to today.
    pub dday: String,
}

impl GoalResponse {
    fn from_goal(goal: Goal) -> Self {
        let dday = moim_core::dday::format_dday(Utc::now().date_naive(), goal.deadline);
        Self { goal, dday }
    }
}

/// POST /api/v1/goals
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateGoal>,
) -> AppResult<(StatusCode, Json<GoalResponse>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Goal title must not be empty".into(),
        )));
    }
    validate_labels(&input.labels)?;

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

    let goal = GoalRepo::create(&state.pool, &input, Some(user.user_id)).await?;

    // A new 진행전 goal can move a completed project back to 진행중.
    rollup::recompute_project(&state.pool, goal.project_id).await?;

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(goal.project_id),
            actor_id: Some(user.user_id),
            entity_type: "goal",
            entity_id: goal.id,
            action: "created",
            detail: Some(goal.title.clone()),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(GoalResponse::from_goal(goal))))
}

/// GET /api/v1/goals/{id}
pub async fn get(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<GoalResponse>> {
    let goal = find_live(&state, id).await?;
    Ok(Json(GoalResponse::from_goal(goal)))
}

/// PUT /api/v1/goals/{id}
///
/// Partial update. A transition to 완료 is gated: every live task under the
/// goal must already be complete, otherwise 409. A goal with zero tasks may
/// be completed manually.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGoal>,
) -> AppResult<Json<GoalResponse>> {
    if let Some(labels) = &input.labels {
        validate_labels(labels)?;
    }

    let mut completed = false;
    if let Some(status) = &input.status {
        let parsed = Status::parse(status).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Unknown status '{status}'")))
        })?;
        if parsed == Status::Complete {
            let children = rollup::goal_children(&state.pool, id).await?;
            if !progress::can_complete(&children, true) {
                return Err(AppError::Core(CoreError::Conflict(
                    "모든 할일이 완료되어야 목표를 완료할 수 있습니다".into(),
                )));
            }
            completed = true;
        }
    }

    let goal = GoalRepo::update(&state.pool, id, &input, Some(user.user_id))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "goal",
                id,
            })
        })?;

    rollup::recompute_project(&state.pool, goal.project_id).await?;

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(goal.project_id),
            actor_id: Some(user.user_id),
            entity_type: "goal",
            entity_id: goal.id,
            action: if completed { "completed" } else { "updated" },
            detail: None,
        },
    )
    .await;

    Ok(Json(GoalResponse::from_goal(goal)))
}

/// DELETE /api/v1/goals/{id}
///
/// Soft-archive. Child tasks keep their own archive flags.
pub async fn archive(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let goal = find_live(&state, id).await?;

    if !GoalRepo::archive(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "goal",
            id,
        }));
    }

    rollup::recompute_project(&state.pool, goal.project_id).await?;

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(goal.project_id),
            actor_id: Some(user.user_id),
            entity_type: "goal",
            entity_id: id,
            action: "archived",
            detail: None,
        },
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/goals/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<GoalResponse>> {
    if !GoalRepo::unarchive(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "archived goal",
            id,
        }));
    }

    let goal = find_live(&state, id).await?;
    rollup::recompute_project(&state.pool, goal.project_id).await?;

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(goal.project_id),
            actor_id: Some(user.user_id),
            entity_type: "goal",
            entity_id: id,
            action: "restored",
            detail: None,
        },
    )
    .await;

    Ok(Json(GoalResponse::from_goal(goal)))
}

/// GET /api/v1/goals/{id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    find_live(&state, id).await?;
    let tasks = TaskRepo::list_by_goal(&state.pool, id).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/goals/{id}/summary
///
/// Server-computed roll-up over the goal's live tasks.
pub async fn summary(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Rollup>> {
    find_live(&state, id).await?;
    let children = rollup::goal_children(&state.pool, id).await?;
    Ok(Json(progress::summarize(&children)))
}

/// Fetch a live goal or return 404.
async fn find_live(state: &AppState, id: DbId) -> AppResult<Goal> {
    GoalRepo::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "goal",
            id,
        })
    })
}
