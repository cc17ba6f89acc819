//! Member-facing user directory (owner/assignee/attendee pickers).

use axum::extract::State;
use axum::Json;
use moim_db::models::user::UserResponse;
use moim_db::repositories::{RoleRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/users
///
/// Active users with resolved role names, for populating pickers. Any
/// authenticated caller; deactivated accounts are filtered out.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    let roles = RoleRepo::list(&state.pool).await?;

    let responses: Vec<UserResponse> = users
        .iter()
        .filter(|u| u.is_active)
        .map(|u| {
            let role = roles
                .iter()
                .find(|r| r.id == u.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            UserResponse {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                initials: u.initials.clone(),
                role,
                role_id: u.role_id,
                is_active: u.is_active,
                last_login_at: u.last_login_at,
                created_at: u.created_at,
            }
        })
        .collect();

    Ok(Json(responses))
}
