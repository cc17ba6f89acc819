//! Route definitions for the `/comments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// GET    /       -> list (?entity_type=&entity_id=)
/// POST   /       -> create
/// PUT    /{id}   -> update (author only)
/// DELETE /{id}   -> delete (author or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(comments::list).post(comments::create))
        .route(
            "/{id}",
            axum::routing::put(comments::update).delete(comments::delete),
        )
}
