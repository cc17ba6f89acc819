//! Route definitions for the `/workspaces` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::workspaces;
use crate::state::AppState;

/// Routes mounted at `/workspaces`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workspaces::list).post(workspaces::create))
        .route(
            "/{id}",
            get(workspaces::get)
                .put(workspaces::update)
                .delete(workspaces::delete),
        )
}
