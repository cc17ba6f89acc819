//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for list endpoints scoped to a workspace (`?workspace_id=`).
#[derive(Debug, Deserialize)]
pub struct WorkspaceScopeParams {
    pub workspace_id: Option<i64>,
}

/// Query parameters for the unified archive listing (`?type=projects`).
#[derive(Debug, Deserialize)]
pub struct ArchiveFilterParams {
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
}
