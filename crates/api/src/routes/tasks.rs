//! Route definitions for the `/tasks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// POST   /               -> create
/// GET    /{id}           -> get
/// PUT    /{id}           -> update
/// DELETE /{id}           -> archive (soft)
/// POST   /{id}/restore   -> restore
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(tasks::create))
        .route(
            "/{id}",
            get(tasks::get).put(tasks::update).delete(tasks::archive),
        )
        .route("/{id}/restore", post(tasks::restore))
}
