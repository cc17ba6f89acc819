//! Handlers for the `/activities` audit feed, plus the recording helper the
//! mutation handlers call.

use axum::extract::{Query, State};
use axum::Json;
use moim_core::types::DbId;
use moim_db::models::activity::{Activity, RecordActivity};
use moim_db::repositories::ActivityRepo;
use moim_db::DbPool;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /activities`.
#[derive(Debug, Deserialize)]
pub struct ActivityFeedParams {
    pub project_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/activities
///
/// Recent activity, newest first, optionally scoped to one project.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ActivityFeedParams>,
) -> AppResult<Json<Vec<Activity>>> {
    let rows = ActivityRepo::list(&state.pool, params.project_id, params.limit, params.offset)
        .await?;
    Ok(Json(rows))
}

/// Record an activity row after a successful mutation.
///
/// Failures are logged and swallowed: the audit feed must never fail the
/// mutation it describes.
pub async fn record(pool: &DbPool, input: RecordActivity) {
    if let Err(err) = ActivityRepo::record(pool, &input).await {
        tracing::warn!(error = %err, entity_type = input.entity_type, "Failed to record activity");
    }
}
