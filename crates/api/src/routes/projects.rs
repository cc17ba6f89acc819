//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get
/// PUT    /{id}           -> update
/// DELETE /{id}           -> archive (soft)
/// POST   /{id}/restore   -> restore
/// GET    /{id}/goals     -> list_goals
/// GET    /{id}/tasks     -> list_tasks
/// GET    /{id}/summary   -> summary (roll-up)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::archive),
        )
        .route("/{id}/restore", post(projects::restore))
        .route("/{id}/goals", get(projects::list_goals))
        .route("/{id}/tasks", get(projects::list_tasks))
        .route("/{id}/summary", get(projects::summary))
}
