//! Route definitions for the `/meetings` resource and attachments.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::meetings;
use crate::state::AppState;

/// Routes mounted at `/meetings`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete (hard)
/// PUT    /{id}/attendees      -> set_attendees
/// GET    /{id}/comments       -> list_comments
/// POST   /{id}/comments       -> create_comment
/// GET    /{id}/attachments    -> list_attachments
/// POST   /{id}/attachments    -> upload_attachment (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meetings::list).post(meetings::create))
        .route(
            "/{id}",
            get(meetings::get)
                .put(meetings::update)
                .delete(meetings::delete),
        )
        .route("/{id}/attendees", put(meetings::set_attendees))
        .route(
            "/{id}/comments",
            get(meetings::list_comments).post(meetings::create_comment),
        )
        .route(
            "/{id}/attachments",
            get(meetings::list_attachments).post(meetings::upload_attachment),
        )
}

/// Routes mounted at `/attachments`.
///
/// ```text
/// GET    /{id}/download   -> download_attachment
/// DELETE /{id}            -> delete_attachment
/// ```
pub fn attachment_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/download", get(meetings::download_attachment))
        .route("/{id}", delete(meetings::delete_attachment))
}
