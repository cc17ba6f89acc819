//! Signup, login, token refresh, and logout.
//!
//! Login failures are counted per account; five in a row lock the account
//! for fifteen minutes. Refresh tokens rotate on every use, so a replayed
//! token is dead the moment its successor is issued.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use moim_core::error::CoreError;
use moim_core::roles::ROLE_MEMBER;
use moim_core::types::DbId;
use moim_db::models::user::{CreateUser, User};
use moim_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Consecutive failed logins that trigger a lockout.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Lockout length in minutes.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by signup, login, refresh, and invitation accept.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Self-service registration. New accounts get the 팀원 role and are logged
/// in immediately.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(validation("Name must not be empty"));
    }
    if !input.email.contains('@') {
        return Err(validation("Invalid email address"));
    }
    validate_password_strength(&input.password)?;

    let taken = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some();
    if taken {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let member_role = RoleRepo::find_by_name(&state.pool, ROLE_MEMBER)
        .await?
        .ok_or_else(|| AppError::InternalError("Member role is not seeded".into()))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: name.to_string(),
            email: input.email.clone(),
            password_hash: hash_password(&input.password)?,
            initials: derive_initials(name),
            role_id: member_role.id,
        },
    )
    .await?;

    let response =
        create_auth_response(&state, user.id, &user.name, &user.email, &member_role.name).await?;

    tracing::info!(user_id = user.id, "New user signed up");
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // The "wrong email" and "wrong password" paths share one message so the
    // endpoint cannot be used to probe which emails exist.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| unauthorized("Invalid email or password"))?;

    ensure_active(&user)?;

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let password_ok = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_ok {
        register_failed_attempt(&state, &user).await?;
        return Err(unauthorized("Invalid email or password"));
    }

    // Success clears the failure counter and stamps last_login_at.
    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let response =
        create_auth_response(&state, user.id, &user.name, &user.email, &role_name).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Trade a live refresh token for a new token pair. The old session is
/// revoked first, so each refresh token works exactly once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let digest = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &digest)
        .await?
        .ok_or_else(|| unauthorized("Invalid or expired refresh token"))?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| unauthorized("User no longer exists"))?;
    ensure_active(&user)?;

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let response =
        create_auth_response(&state, user.id, &user.name, &user.email, &role_name).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revokes every session the caller holds, on all devices.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Display initials: the first two characters of the name, uppercased.
pub fn derive_initials(name: &str) -> String {
    name.trim()
        .chars()
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Mint a token pair, persist the session, and assemble the response body.
///
/// Shared with the invitation-accept flow, which also logs the new user in.
pub async fn create_auth_response(
    state: &AppState,
    user_id: DbId,
    name: &str,
    email: &str,
    role: &str,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let (refresh_plaintext, refresh_digest) = generate_refresh_token();

    let session_expires = Utc::now() + Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::create(&state.pool, user_id, &refresh_digest, session_expires).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user_id,
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        },
    })
}

/// Bump the failure counter and lock the account at the threshold.
async fn register_failed_attempt(state: &AppState, user: &User) -> AppResult<()> {
    UserRepo::increment_failed_login(&state.pool, user.id).await?;

    if user.failed_login_count + 1 >= MAX_FAILED_ATTEMPTS {
        let until = Utc::now() + Duration::minutes(LOCK_DURATION_MINS);
        UserRepo::lock_account(&state.pool, user.id, until).await?;
        tracing::warn!(user_id = user.id, "Account locked after repeated failures");
    }
    Ok(())
}

fn ensure_active(user: &User) -> AppResult<()> {
    if user.is_active {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )))
    }
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

fn validation(message: &str) -> AppError {
    AppError::Core(CoreError::Validation(message.to_string()))
}
