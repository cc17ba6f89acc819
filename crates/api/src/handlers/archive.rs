//! Handlers for the unified `/archive` view and purge operations.
//!
//! Restore of a single entity lives on each resource (`POST
//! /{resource}/{id}/restore`); this module adds the cross-entity listing, a
//! batch restore, and the admin-only purge endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use moim_core::error::CoreError;
use moim_core::types::DbId;
use moim_db::repositories::archive_repo::{
    is_known_entity_type, ArchiveRepo, ArchiveSummary, PurgeOutcome, PurgePreview,
};
use moim_db::repositories::{GoalRepo, ProjectRepo, TaskRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::rollup;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ArchiveFilterParams;
use crate::state::AppState;

/// Request body for `POST /archive/restore`: ids grouped by entity type.
#[derive(Debug, Deserialize, Default)]
pub struct BatchRestoreRequest {
    #[serde(default)]
    pub projects: Vec<DbId>,
    #[serde(default)]
    pub goals: Vec<DbId>,
    #[serde(default)]
    pub tasks: Vec<DbId>,
}

/// Per-type restore counts returned by the batch restore.
#[derive(Debug, Serialize)]
pub struct BatchRestoreResponse {
    pub projects: usize,
    pub goals: usize,
    pub tasks: usize,
}

/// GET /api/v1/archive
///
/// Archived rows across projects, goals, and tasks. `?type=` narrows to one
/// entity type.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ArchiveFilterParams>,
) -> AppResult<Json<ArchiveSummary>> {
    if let Some(entity_type) = &params.entity_type {
        if !is_known_entity_type(entity_type) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown archive entity type '{entity_type}'"
            ))));
        }
    }
    let summary = ArchiveRepo::list_archived(&state.pool, params.entity_type.as_deref()).await?;
    Ok(Json(summary))
}

/// POST /api/v1/archive/restore
///
/// Restore a batch of archived entities. Tasks are restored first, then
/// goals, then projects, so parent roll-ups are recomputed over the final
/// child set. Ids that are not archived are skipped, not errors.
pub async fn batch_restore(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<BatchRestoreRequest>,
) -> AppResult<Json<BatchRestoreResponse>> {
    let mut restored = BatchRestoreResponse {
        projects: 0,
        goals: 0,
        tasks: 0,
    };

    for id in &input.tasks {
        if TaskRepo::unarchive(&state.pool, *id).await? {
            restored.tasks += 1;
            if let Some(task) = TaskRepo::find_by_id(&state.pool, *id).await? {
                rollup::recompute_task_parents(&state.pool, task.project_id, task.goal_id).await?;
            }
        }
    }

    for id in &input.goals {
        if GoalRepo::unarchive(&state.pool, *id).await? {
            restored.goals += 1;
            if let Some(goal) = GoalRepo::find_by_id(&state.pool, *id).await? {
                rollup::recompute_project(&state.pool, goal.project_id).await?;
            }
        }
    }

    for id in &input.projects {
        if ProjectRepo::unarchive(&state.pool, *id).await? {
            restored.projects += 1;
        }
    }

    Ok(Json(restored))
}

/// GET /api/v1/archive/purge/preview
///
/// Row counts a purge-all would remove. Admin only.
pub async fn purge_preview(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<PurgePreview>> {
    let preview = ArchiveRepo::purge_preview(&state.pool).await?;
    Ok(Json(preview))
}

/// DELETE /api/v1/archive/{type}/{id}
///
/// Hard-delete one archived row. Admin only; live rows are never purged,
/// directly or through a parent's FK cascade.
pub async fn purge_one(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((entity_type, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    if !is_known_entity_type(&entity_type) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown archive entity type '{entity_type}'"
        ))));
    }

    match ArchiveRepo::purge_one(&state.pool, &entity_type, id).await? {
        PurgeOutcome::Purged => {}
        PurgeOutcome::NotFound => {
            let entity = match entity_type.as_str() {
                "projects" => "archived project",
                "goals" => "archived goal",
                _ => "archived task",
            };
            return Err(AppError::Core(CoreError::NotFound { entity, id }));
        }
        PurgeOutcome::Blocked => {
            return Err(AppError::Core(CoreError::Conflict(
                "Cannot purge an archived entity that still has live children; \
                 archive or restore them first"
                    .into(),
            )));
        }
    }

    tracing::info!(admin_id = admin.user_id, entity_type, id, "Archived row purged");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/archive
///
/// Hard-delete every archived row, children before parents. Admin only.
pub async fn purge_all(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<StatusCode> {
    ArchiveRepo::purge_all(&state.pool).await?;
    tracing::info!(admin_id = admin.user_id, "Archive purged");
    Ok(StatusCode::NO_CONTENT)
}
