pub mod admin;
pub mod archive;
pub mod auth;
pub mod comments;
pub mod goals;
pub mod health;
pub mod invitations;
pub mod meetings;
pub mod projects;
pub mod tasks;
pub mod workspaces;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                     signup (public)
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout (requires auth)
///
/// /users                           active user directory
///
/// /projects                        CRUD + summary + nested goal/task listings
/// /goals                           CRUD + summary + nested task listing
/// /tasks                           CRUD (status derived from progress)
///
/// /archive                         unified archive view, restore, purge
///
/// /meetings                        CRUD + attendees + comments + attachments
/// /attachments                     download, delete
/// /comments                        polymorphic comments
///
/// /workspaces                      CRUD (delete is admin only)
/// /invitations                     create, list, accept (public), delete
/// /activities                      audit feed
///
/// /ai/project                      LLM project diagnosis (503 if unconfigured)
/// /ai/member                       LLM member workload diagnosis
///
/// /admin/users                     user management (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route("/users", get(handlers::users::list))
        .nest("/projects", projects::router())
        .nest("/goals", goals::router())
        .nest("/tasks", tasks::router())
        .nest("/archive", archive::router())
        .nest("/meetings", meetings::router())
        .nest("/attachments", meetings::attachment_router())
        .nest("/comments", comments::router())
        .nest("/workspaces", workspaces::router())
        .nest("/invitations", invitations::router())
        .route("/activities", get(handlers::activities::list))
        .route("/ai/project", post(handlers::diagnostics::diagnose_project))
        .route("/ai/member", post(handlers::diagnostics::diagnose_member))
        .nest("/admin", admin::router())
}
