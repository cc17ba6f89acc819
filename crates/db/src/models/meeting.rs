//! Meeting entity model and DTOs.

use moim_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A meeting row from the `meetings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Meeting {
    pub id: DbId,
    pub workspace_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub meeting_type: Option<String>,
    pub location: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Option<Timestamp>,
    pub attendee_ids: Vec<DbId>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new meeting.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMeeting {
    pub workspace_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub meeting_type: Option<String>,
    pub location: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Option<Timestamp>,
    #[serde(default)]
    pub attendee_ids: Vec<DbId>,
}

/// DTO for updating an existing meeting. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMeeting {
    pub title: Option<String>,
    pub description: Option<String>,
    pub meeting_type: Option<String>,
    pub location: Option<String>,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
}
