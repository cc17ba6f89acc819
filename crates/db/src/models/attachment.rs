//! Meeting attachment metadata model.

use moim_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An attachment row from the `attachments` table.
///
/// The file body lives on disk under the configured upload directory;
/// only metadata is stored here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub meeting_id: DbId,
    pub file_name: String,
    /// Path relative to the upload directory. Not exposed for traversal;
    /// downloads always resolve through the repository.
    pub stored_path: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload built by the upload handler (not client-deserialized).
#[derive(Debug, Clone)]
pub struct CreateAttachment {
    pub meeting_id: DbId,
    pub file_name: String,
    pub stored_path: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub uploaded_by: Option<DbId>,
}
