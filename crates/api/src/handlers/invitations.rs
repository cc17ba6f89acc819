//! Handlers for the `/invitations` resource.
//!
//! Invitations carry a server-generated single-use token. Acceptance is the
//! one unauthenticated mutation in the API: the invitee exchanges the token
//! plus a name and password for a new account and a login session.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use moim_core::error::CoreError;
use moim_core::types::DbId;
use moim_db::models::invitation::{CreateInvitation, Invitation, INVITATION_PENDING};
use moim_db::models::user::CreateUser;
use moim_db::repositories::{InvitationRepo, RoleRepo, UserRepo};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::{create_auth_response, derive_initials, AuthResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /invitations/accept`.
#[derive(Debug, Deserialize)]
pub struct AcceptInvitationRequest {
    pub token: String,
    pub name: String,
    pub password: String,
}

/// POST /api/v1/invitations
///
/// Create a pending invitation. If SMTP is configured the acceptance link is
/// mailed; otherwise the invitation (with its token) is only returned to the
/// inviter, who shares the link out of band.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateInvitation>,
) -> AppResult<(StatusCode, Json<Invitation>)> {
    if !input.invitee_email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid invitee email address".into(),
        )));
    }

    if UserRepo::find_by_email(&state.pool, &input.invitee_email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with this email already exists".into(),
        )));
    }
    if InvitationRepo::find_pending_by_email(&state.pool, &input.invitee_email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A pending invitation for this email already exists".into(),
        )));
    }

    if RoleRepo::find_by_id(&state.pool, input.role_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "role",
            id: input.role_id,
        }));
    }

    let inviter = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let token = Uuid::new_v4().to_string();
    let invitation = InvitationRepo::create(
        &state.pool,
        &inviter.email,
        &input.invitee_email,
        input.role_id,
        &token,
    )
    .await?;

    // Mail delivery is best-effort; the invitation is valid either way.
    if let Some(mailer) = &state.mailer {
        if let Err(err) = mailer
            .send_invitation(&invitation.invitee_email, &inviter.name, &invitation.token)
            .await
        {
            tracing::warn!(error = %err, invitee = %invitation.invitee_email, "Failed to send invitation email");
        }
    }

    Ok((StatusCode::CREATED, Json(invitation)))
}

/// GET /api/v1/invitations
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Invitation>>> {
    let invitations = InvitationRepo::list(&state.pool).await?;
    Ok(Json(invitations))
}

/// POST /api/v1/invitations/accept
///
/// Unauthenticated: exchange a pending token for a new account. Returns a
/// full login session so the invitee lands signed in.
pub async fn accept(
    State(state): State<AppState>,
    Json(input): Json<AcceptInvitationRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    validate_password_strength(&input.password)?;

    let invitation = InvitationRepo::find_by_token(&state.pool, &input.token)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Validation("Unknown invitation token".into())))?;

    if invitation.status != INVITATION_PENDING {
        return Err(AppError::Core(CoreError::Conflict(
            "Invitation has already been accepted".into(),
        )));
    }
    if UserRepo::find_by_email(&state.pool, &invitation.invitee_email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with this email already exists".into(),
        )));
    }

    let role_name = RoleRepo::resolve_name(&state.pool, invitation.role_id).await?;
    let password_hash = hash_password(&input.password)?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: name.to_string(),
            email: invitation.invitee_email.clone(),
            password_hash,
            initials: derive_initials(name),
            role_id: invitation.role_id,
        },
    )
    .await?;

    InvitationRepo::mark_accepted(&state.pool, invitation.id).await?;

    let response =
        create_auth_response(&state, user.id, &user.name, &user.email, &role_name).await?;

    tracing::info!(user_id = user.id, invitation_id = invitation.id, "Invitation accepted");
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/v1/invitations/{id}
///
/// Withdraw an invitation (pending or not).
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !InvitationRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "invitation",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
