//! Handlers for the `/meetings` resource and its attachments.
//!
//! Attachment bodies live on disk under the configured upload directory;
//! the database holds metadata only. Stored file names are generated UUIDs
//! so client-supplied names never touch the filesystem path.

use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use moim_core::error::CoreError;
use moim_core::types::DbId;
use moim_db::models::attachment::{Attachment, CreateAttachment};
use moim_db::models::comment::{Comment, CreateComment};
use moim_db::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};
use moim_db::repositories::{AttachmentRepo, CommentRepo, MeetingRepo};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::WorkspaceScopeParams;
use crate::state::AppState;

/// Maximum attachment size in bytes (10 MiB).
const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// Request body for `PUT /meetings/{id}/attendees`.
#[derive(Debug, Deserialize)]
pub struct SetAttendeesRequest {
    pub attendee_ids: Vec<DbId>,
}

/// POST /api/v1/meetings
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateMeeting>,
) -> AppResult<(StatusCode, Json<Meeting>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Meeting title must not be empty".into(),
        )));
    }
    if let Some(end_at) = input.end_at {
        if end_at < input.start_at {
            return Err(AppError::Core(CoreError::Validation(
                "Meeting end must not precede its start".into(),
            )));
        }
    }

    let meeting = MeetingRepo::create(&state.pool, &input, Some(user.user_id)).await?;
    Ok((StatusCode::CREATED, Json(meeting)))
}

/// GET /api/v1/meetings
///
/// Meetings newest-start first. `?workspace_id=` narrows to one workspace.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<WorkspaceScopeParams>,
) -> AppResult<Json<Vec<Meeting>>> {
    let meetings = match params.workspace_id {
        Some(workspace_id) => MeetingRepo::list_by_workspace(&state.pool, workspace_id).await?,
        None => MeetingRepo::list(&state.pool).await?,
    };
    Ok(Json(meetings))
}

/// GET /api/v1/meetings/{id}
pub async fn get(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Meeting>> {
    let meeting = find(&state, id).await?;
    Ok(Json(meeting))
}

/// PUT /api/v1/meetings/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMeeting>,
) -> AppResult<Json<Meeting>> {
    let meeting = MeetingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "meeting",
                id,
            })
        })?;
    Ok(Json(meeting))
}

/// PUT /api/v1/meetings/{id}/attendees
///
/// Replace the attendee set wholesale.
pub async fn set_attendees(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetAttendeesRequest>,
) -> AppResult<Json<Meeting>> {
    let meeting = MeetingRepo::set_attendees(&state.pool, id, &input.attendee_ids)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "meeting",
                id,
            })
        })?;
    Ok(Json(meeting))
}

/// DELETE /api/v1/meetings/{id}
///
/// Hard delete. Attachment rows cascade in the schema; their file bodies and
/// the meeting's polymorphic comments are cleaned up here.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let attachments = AttachmentRepo::list_by_meeting(&state.pool, id).await?;

    if !MeetingRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "meeting",
            id,
        }));
    }

    CommentRepo::delete_by_entity(&state.pool, "meeting", id).await?;

    // File bodies are best-effort; a missing file is not worth failing over.
    for attachment in attachments {
        let path = state.config.upload_dir.join(&attachment.stored_path);
        if let Err(err) = tokio::fs::remove_file(&path).await {
            tracing::warn!(error = %err, path = %path.display(), "Failed to remove attachment file");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Request body for `POST /meetings/{id}/comments`; the entity binding comes
/// from the path.
#[derive(Debug, Deserialize)]
pub struct MeetingCommentRequest {
    pub content: String,
}

/// POST /api/v1/meetings/{id}/comments
///
/// Nested alias for the polymorphic comment endpoint, scoped to one meeting.
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<MeetingCommentRequest>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment content must not be empty".into(),
        )));
    }
    find(&state, id).await?;

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            entity_type: "meeting".to_string(),
            entity_id: id,
            content: input.content,
        },
        user.user_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/meetings/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Comment>>> {
    find(&state, id).await?;
    let comments = CommentRepo::list_by_entity(&state.pool, "meeting", id).await?;
    Ok(Json(comments))
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// POST /api/v1/meetings/{id}/attachments
///
/// Multipart upload; the file goes in a `file` field. The body is written
/// under the upload directory with a generated name before metadata is
/// inserted, so a failed insert leaves no dangling row.
pub async fn upload_attachment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Attachment>)> {
    find(&state, id).await?;

    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or("attachment").to_string();
            let content_type = field.content_type().map(|ct| ct.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file = Some((file_name, content_type, data.to_vec()));
        }
        // Unknown fields are ignored.
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing 'file' field".into()))?;

    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > MAX_ATTACHMENT_BYTES {
        return Err(AppError::BadRequest(format!(
            "File exceeds the {MAX_ATTACHMENT_BYTES} byte limit"
        )));
    }

    // Stored name: UUID plus the original extension, never the client name.
    let stored_path = match std::path::Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };

    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(state.config.upload_dir.join(&stored_path), &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write attachment: {e}")))?;

    let attachment = AttachmentRepo::create(
        &state.pool,
        &CreateAttachment {
            meeting_id: id,
            file_name,
            stored_path,
            content_type,
            size_bytes: data.len() as i64,
            uploaded_by: Some(user.user_id),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(attachment)))
}

/// GET /api/v1/meetings/{id}/attachments
pub async fn list_attachments(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Attachment>>> {
    find(&state, id).await?;
    let attachments = AttachmentRepo::list_by_meeting(&state.pool, id).await?;
    Ok(Json(attachments))
}

/// GET /api/v1/attachments/{id}/download
///
/// Stream the file body with its original name in Content-Disposition.
pub async fn download_attachment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let attachment = AttachmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "attachment",
                id,
            })
        })?;

    let path = state.config.upload_dir.join(&attachment.stored_path);
    let data = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read attachment: {e}")))?;

    let content_type = attachment
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    // Non-ASCII original names go through RFC 5987 percent-encoding.
    let disposition = if attachment.file_name.is_ascii() {
        format!("attachment; filename=\"{}\"", attachment.file_name)
    } else {
        let encoded: String = attachment
            .file_name
            .bytes()
            .map(|b| format!("%{b:02X}"))
            .collect();
        format!("attachment; filename*=UTF-8''{encoded}")
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(data))
        .map_err(|e| AppError::InternalError(format!("Failed to build response: {e}")))
}

/// DELETE /api/v1/attachments/{id}
pub async fn delete_attachment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let attachment = AttachmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "attachment",
                id,
            })
        })?;

    AttachmentRepo::delete(&state.pool, id).await?;

    let path = state.config.upload_dir.join(&attachment.stored_path);
    if let Err(err) = tokio::fs::remove_file(&path).await {
        tracing::warn!(error = %err, path = %path.display(), "Failed to remove attachment file");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Fetch a meeting or return 404.
async fn find(state: &AppState, id: DbId) -> AppResult<Meeting> {
    MeetingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "meeting",
                id,
            })
        })
}
