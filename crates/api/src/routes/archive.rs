//! Route definitions for the unified `/archive` view.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::archive;
use crate::state::AppState;

/// Routes mounted at `/archive`.
///
/// ```text
/// GET    /                 -> list (?type=projects|goals|tasks)
/// POST   /restore          -> batch_restore
/// GET    /purge/preview    -> purge_preview (admin)
/// DELETE /{type}/{id}      -> purge_one (admin)
/// DELETE /                 -> purge_all (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(archive::list).delete(archive::purge_all))
        .route("/restore", post(archive::batch_restore))
        .route("/purge/preview", get(archive::purge_preview))
        .route("/{type}/{id}", delete(archive::purge_one))
}
