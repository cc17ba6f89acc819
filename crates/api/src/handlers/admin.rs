//! Admin console: user management under `/admin/users`.
//!
//! Every handler takes [`RequireAdmin`], so the 관리자 check happens on the
//! server regardless of what the client claims.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use moim_core::error::CoreError;
use moim_core::types::DbId;
use moim_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use moim_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::derive_initials;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: DbId,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Provision an account with an explicit role. The response never carries
/// the password hash.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    validate_password_strength(&input.password)?;

    let role_exists = RoleRepo::find_by_id(&state.pool, input.role_id)
        .await?
        .is_some();
    if !role_exists {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "role",
            id: input.role_id,
        }));
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            initials: derive_initials(&name),
            name,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            role_id: input.role_id,
        },
    )
    .await?;

    let response = with_resolved_role(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/admin/users
///
/// All users, active and not, with role names resolved from a single
/// roles query rather than one lookup per user.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    let roles = RoleRepo::list(&state.pool).await?;

    let responses = users
        .iter()
        .map(|user| {
            let role = roles
                .iter()
                .find(|role| role.id == user.role_id)
                .map_or_else(|| "unknown".to_string(), |role| role.name.clone());
            sanitize(user, role)
        })
        .collect();

    Ok(Json(responses))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(with_resolved_role(&state, &user).await?))
}

/// PUT /api/v1/admin/users/{id}
///
/// Profile update; a renamed user gets freshly derived initials. Passwords
/// go through the dedicated reset endpoint instead.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let changes = UpdateUser {
        initials: input.name.as_deref().map(derive_initials),
        name: input.name,
        email: input.email,
        role_id: input.role_id,
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(with_resolved_role(&state, &user).await?))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivate rather than delete: the row stays for audit, but logins stop
/// and every live session is revoked.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(user_not_found(id));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/users/{id}/purge
///
/// Hard delete. The user's id is stripped from every owner/assignee array
/// in the same transaction as the row delete. Admins cannot purge
/// themselves; locking the last admin out would be unrecoverable.
pub async fn purge_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if admin.user_id == id {
        return Err(AppError::Core(CoreError::Validation(
            "Admins cannot delete their own account".into(),
        )));
    }

    if !UserRepo::delete_with_assignments(&state.pool, id).await? {
        return Err(user_not_found(id));
    }

    tracing::info!(admin_id = admin.user_id, user_id = id, "User purged");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Sessions are revoked along with the change so refresh tokens issued
/// under the old password stop working.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)?;

    let digest = hash_password(&input.new_password)?;
    if !UserRepo::set_password_hash(&state.pool, id, &digest).await? {
        return Err(user_not_found(id));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn with_resolved_role(state: &AppState, user: &User) -> AppResult<UserResponse> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(sanitize(user, role))
}

/// Drop the password hash and lockout bookkeeping from a [`User`] row.
fn sanitize(user: &User, role: String) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        initials: user.initials.clone(),
        role,
        role_id: user.role_id,
        is_active: user.is_active,
        last_login_at: user.last_login_at,
        created_at: user.created_at,
    }
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "user", id })
}
