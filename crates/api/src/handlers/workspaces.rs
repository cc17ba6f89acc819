//! Handlers for the `/workspaces` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use moim_core::error::CoreError;
use moim_core::types::DbId;
use moim_db::models::workspace::{CreateWorkspace, UpdateWorkspace, Workspace};
use moim_db::repositories::WorkspaceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/workspaces
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateWorkspace>,
) -> AppResult<(StatusCode, Json<Workspace>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Workspace name must not be empty".into(),
        )));
    }
    let workspace = WorkspaceRepo::create(&state.pool, &input, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

/// GET /api/v1/workspaces
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Workspace>>> {
    let workspaces = WorkspaceRepo::list(&state.pool).await?;
    Ok(Json(workspaces))
}

/// GET /api/v1/workspaces/{id}
pub async fn get(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Workspace>> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "workspace",
                id,
            })
        })?;
    Ok(Json(workspace))
}

/// PUT /api/v1/workspaces/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkspace>,
) -> AppResult<Json<Workspace>> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Workspace name must not be empty".into(),
            )));
        }
    }
    let workspace = WorkspaceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "workspace",
                id,
            })
        })?;
    Ok(Json(workspace))
}

/// DELETE /api/v1/workspaces/{id}
///
/// Admin only. Projects and meetings scoped to the workspace survive and
/// fall back to the global scope (FK is ON DELETE SET NULL).
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !WorkspaceRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "workspace",
            id,
        }));
    }
    tracing::info!(admin_id = admin.user_id, workspace_id = id, "Workspace deleted");
    Ok(StatusCode::NO_CONTENT)
}
