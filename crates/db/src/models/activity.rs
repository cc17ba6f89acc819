//! Activity (audit feed) entity model.

use moim_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An activity row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub entity_type: String,
    pub entity_id: DbId,
    /// created / updated / archived / restored / completed ...
    pub action: String,
    pub detail: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload built by handlers after a successful mutation.
#[derive(Debug, Clone)]
pub struct RecordActivity {
    pub project_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub entity_type: &'static str,
    pub entity_id: DbId,
    pub action: &'static str,
    pub detail: Option<String>,
}
