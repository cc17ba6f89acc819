//! Role checks on top of [`AuthUser`].
//!
//! The role comes from the signed token, never from anything the client
//! claims in the request body.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use moim_core::error::CoreError;
use moim_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that only admits the 관리자 role; everyone else gets 403.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role == ROLE_ADMIN {
            Ok(RequireAdmin(user))
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".to_string(),
            )))
        }
    }
}
