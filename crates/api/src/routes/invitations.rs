//! Route definitions for the `/invitations` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::invitations;
use crate::state::AppState;

/// Routes mounted at `/invitations`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// POST   /accept   -> accept (public; token is the credential)
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(invitations::list).post(invitations::create))
        .route("/accept", post(invitations::accept))
        .route("/{id}", delete(invitations::delete))
}
