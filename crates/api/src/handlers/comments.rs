//! Handlers for the polymorphic `/comments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use moim_core::error::CoreError;
use moim_core::roles::ROLE_ADMIN;
use moim_core::types::DbId;
use moim_db::models::comment::{Comment, CreateComment, UpdateComment, COMMENT_ENTITY_TYPES};
use moim_db::repositories::CommentRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /comments`.
#[derive(Debug, Deserialize)]
pub struct CommentListParams {
    pub entity_type: String,
    pub entity_id: DbId,
}

/// POST /api/v1/comments
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    validate_entity_type(&input.entity_type)?;
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment content must not be empty".into(),
        )));
    }

    let comment = CommentRepo::create(&state.pool, &input, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/comments?entity_type=&entity_id=
///
/// Comments on one entity, oldest first (conversation order).
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<Vec<Comment>>> {
    validate_entity_type(&params.entity_type)?;
    let comments =
        CommentRepo::list_by_entity(&state.pool, &params.entity_type, params.entity_id).await?;
    Ok(Json(comments))
}

/// PUT /api/v1/comments/{id}
///
/// Edit a comment's content. Authors only.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<Json<Comment>> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment content must not be empty".into(),
        )));
    }

    let existing = find(&state, id).await?;
    if existing.author_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author may edit a comment".into(),
        )));
    }

    let comment = CommentRepo::update_content(&state.pool, id, &input.content)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "comment",
                id,
            })
        })?;
    Ok(Json(comment))
}

/// DELETE /api/v1/comments/{id}
///
/// Authors may delete their own comments; admins may delete any.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find(&state, id).await?;
    if existing.author_id != user.user_id && user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an admin may delete a comment".into(),
        )));
    }

    CommentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reject unknown comment targets.
fn validate_entity_type(entity_type: &str) -> AppResult<()> {
    if !COMMENT_ENTITY_TYPES.contains(&entity_type) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown comment entity type '{entity_type}'"
        ))));
    }
    Ok(())
}

/// Fetch a comment or return 404.
async fn find(state: &AppState, id: DbId) -> AppResult<Comment> {
    CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "comment",
                id,
            })
        })
}
