//! Route definitions for the `/goals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::goals;
use crate::state::AppState;

/// Routes mounted at `/goals`.
///
/// ```text
/// POST   /               -> create
/// GET    /{id}           -> get
/// PUT    /{id}           -> update
/// DELETE /{id}           -> archive (soft)
/// POST   /{id}/restore   -> restore
/// GET    /{id}/tasks     -> list_tasks
/// GET    /{id}/summary   -> summary (roll-up)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(goals::create))
        .route(
            "/{id}",
            get(goals::get).put(goals::update).delete(goals::archive),
        )
        .route("/{id}/restore", post(goals::restore))
        .route("/{id}/tasks", get(goals::list_tasks))
        .route("/{id}/summary", get(goals::summary))
}
