//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use moim_core::error::CoreError;
use moim_core::labels::validate_labels;
use moim_core::progress::{self, Rollup};
use moim_core::status::Status;
use moim_core::types::DbId;
use moim_db::models::activity::RecordActivity;
use moim_db::models::goal::Goal;
use moim_db::models::project::{CreateProject, Project, UpdateProject};
use moim_db::models::task::Task;
use moim_db::repositories::{GoalRepo, ProjectRepo, TaskRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{activities, rollup};
use crate::middleware::auth::AuthUser;
use crate::query::WorkspaceScopeParams;
use crate::state::AppState;

/// A project together with its display-ready D-day string.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: Project,
    /// "-", "D-Day", "D-{n}", or "D+{n}" relative to today.
    pub dday: String,
}

impl ProjectResponse {
    fn from_project(project: Project) -> Self {
        let dday = moim_core::dday::format_dday(Utc::now().date_naive(), project.deadline);
        Self { project, dday }
    }
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project name must not be empty".into(),
        )));
    }
    if input.code.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project code must not be empty".into(),
        )));
    }
    validate_labels(&input.labels)?;

    let project = ProjectRepo::create(&state.pool, &input, Some(user.user_id)).await?;

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(project.id),
            actor_id: Some(user.user_id),
            entity_type: "project",
            entity_id: project.id,
            action: "created",
            detail: Some(project.name.clone()),
        },
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse::from_project(project)),
    ))
}

/// GET /api/v1/projects
///
/// Live projects, newest first. `?workspace_id=` narrows to one workspace.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<WorkspaceScopeParams>,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    let projects = match params.workspace_id {
        Some(workspace_id) => ProjectRepo::list_by_workspace(&state.pool, workspace_id).await?,
        None => ProjectRepo::list(&state.pool).await?,
    };
    Ok(Json(
        projects
            .into_iter()
            .map(ProjectResponse::from_project)
            .collect(),
    ))
}

/// GET /api/v1/projects/{id}
pub async fn get(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectResponse>> {
    let project = find_live(&state, id).await?;
    Ok(Json(ProjectResponse::from_project(project)))
}

/// PUT /api/v1/projects/{id}
///
/// Partial update. A transition to 완료 is gated: every child (goal or
/// project-direct task) must already be complete, otherwise 409.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ProjectResponse>> {
    if let Some(labels) = &input.labels {
        validate_labels(labels)?;
    }
    if let Some(status) = &input.status {
        let parsed = Status::parse(status).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Unknown status '{status}'")))
        })?;
        if parsed == Status::Complete {
            let children = rollup::project_children(&state.pool, id).await?;
            if !progress::can_complete(&children, false) {
                return Err(AppError::Core(CoreError::Conflict(
                    "모든 목표가 완료되어야 프로젝트를 완료할 수 있습니다".into(),
                )));
            }
        }
    }

    let project = ProjectRepo::update(&state.pool, id, &input, Some(user.user_id))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "project",
                id,
            })
        })?;

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(project.id),
            actor_id: Some(user.user_id),
            entity_type: "project",
            entity_id: project.id,
            action: "updated",
            detail: None,
        },
    )
    .await;

    Ok(Json(ProjectResponse::from_project(project)))
}

/// DELETE /api/v1/projects/{id}
///
/// Soft-archive. The project disappears from default listings; child goals
/// and tasks keep their own archive flags.
pub async fn archive(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ProjectRepo::archive(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }));
    }

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(id),
            actor_id: Some(user.user_id),
            entity_type: "project",
            entity_id: id,
            action: "archived",
            detail: None,
        },
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectResponse>> {
    if !ProjectRepo::unarchive(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "archived project",
            id,
        }));
    }

    activities::record(
        &state.pool,
        RecordActivity {
            project_id: Some(id),
            actor_id: Some(user.user_id),
            entity_type: "project",
            entity_id: id,
            action: "restored",
            detail: None,
        },
    )
    .await;

    let project = find_live(&state, id).await?;
    Ok(Json(ProjectResponse::from_project(project)))
}

/// GET /api/v1/projects/{id}/goals
pub async fn list_goals(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Goal>>> {
    find_live(&state, id).await?;
    let goals = GoalRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(goals))
}

/// GET /api/v1/projects/{id}/tasks
///
/// All live tasks under the project, both goal-owned and project-direct.
pub async fn list_tasks(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    find_live(&state, id).await?;
    let tasks = TaskRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(tasks))
}

/// Roll-up plus the project's own D-day label.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub rollup: Rollup,
    pub dday: String,
}

/// GET /api/v1/projects/{id}/summary
///
/// Server-computed roll-up: status, mean progress, completed/total children,
/// and the deadline's D-day label.
pub async fn summary(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectSummary>> {
    let project = find_live(&state, id).await?;
    let children = rollup::project_children(&state.pool, id).await?;
    Ok(Json(ProjectSummary {
        rollup: progress::summarize(&children),
        dday: moim_core::dday::format_dday(Utc::now().date_naive(), project.deadline),
    }))
}

/// Fetch a live project or return 404.
async fn find_live(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "project",
                id,
            })
        })
}
