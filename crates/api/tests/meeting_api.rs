//! HTTP-level integration tests for meetings, attendees, file attachments,
//! and polymorphic comments.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use common::{body_json, delete_auth, get_auth, member_token, post_json_auth, put_json_auth};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

async fn create_meeting(pool: &PgPool, token: &str, title: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "title": title,
        "start_at": "2026-09-01T10:00:00Z",
        "end_at": "2026-09-01T11:00:00Z"
    });
    let response =
        post_json_auth(common::build_test_app(pool.clone()), "/api/v1/meetings", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Upload a small text file to a meeting via multipart and return the
/// attachment JSON.
async fn upload_attachment(
    pool: &PgPool,
    token: &str,
    meeting_id: i64,
    file_name: &str,
    content: &str,
) -> serde_json::Value {
    let boundary = "test-boundary-7MA4YWxkTrZu0gW";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         {content}\r\n\
         --{boundary}--\r\n"
    );

    let response = common::build_test_app(pool.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/meetings/{meeting_id}/attachments"))
                .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Meetings
// ---------------------------------------------------------------------------

/// Create and fetch a meeting.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_get_meeting(pool: PgPool) {
    let token = member_token(&pool, "meet-create@test.com").await;
    let meeting = create_meeting(&pool, &token, "주간 회의").await;
    let id = meeting["id"].as_i64().unwrap();

    assert_eq!(meeting["title"], "주간 회의");

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/meetings/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "주간 회의");
}

/// A meeting may not end before it starts.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_meeting_end_before_start(pool: PgPool) {
    let token = member_token(&pool, "meet-order@test.com").await;

    let body = serde_json::json!({
        "title": "거꾸로 회의",
        "start_at": "2026-09-01T11:00:00Z",
        "end_at": "2026-09-01T10:00:00Z"
    });
    let response =
        post_json_auth(common::build_test_app(pool), "/api/v1/meetings", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Attendees are replaced wholesale via PUT.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_attendees(pool: PgPool) {
    let token = member_token(&pool, "meet-attend@test.com").await;
    let (other_id, _) =
        common::create_test_user(&pool, "참석자", "attendee@test.com", "팀원").await;
    let meeting = create_meeting(&pool, &token, "참석자 회의").await;
    let id = meeting["id"].as_i64().unwrap();

    let body = serde_json::json!({ "attendee_ids": [other_id] });
    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/meetings/{id}/attendees"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["attendee_ids"], serde_json::json!([other_id]));
}

/// Deleting a meeting removes it and its comments.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_meeting(pool: PgPool) {
    let token = member_token(&pool, "meet-delete@test.com").await;
    let meeting = create_meeting(&pool, &token, "사라질 회의").await;
    let id = meeting["id"].as_i64().unwrap();

    let comment_body = serde_json::json!({
        "entity_type": "meeting", "entity_id": id, "content": "회의록 초안"
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/comments",
        comment_body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/meetings/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/meetings/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/comments?entity_type=meeting&entity_id={id}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// Upload then download round-trips the file body and original name.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attachment_upload_download(pool: PgPool) {
    let token = member_token(&pool, "meet-attach@test.com").await;
    let meeting = create_meeting(&pool, &token, "자료 회의").await;
    let meeting_id = meeting["id"].as_i64().unwrap();

    let attachment =
        upload_attachment(&pool, &token, meeting_id, "notes.txt", "agenda items").await;
    assert_eq!(attachment["file_name"], "notes.txt");
    assert_eq!(attachment["meeting_id"], meeting_id);
    // The stored name is generated; the client name never becomes a path.
    assert_ne!(attachment["stored_path"], "notes.txt");
    let attachment_id = attachment["id"].as_i64().unwrap();

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/attachments/{attachment_id}/download"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_TYPE].to_str().unwrap(),
        "text/plain"
    );
    let disposition = response.headers()["content-disposition"].to_str().unwrap();
    assert!(disposition.contains("notes.txt"), "got: {disposition}");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"agenda items");

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/meetings/{meeting_id}/attachments"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

/// Korean filenames survive via RFC 5987 encoding in Content-Disposition.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attachment_korean_filename(pool: PgPool) {
    let token = member_token(&pool, "meet-korean@test.com").await;
    let meeting = create_meeting(&pool, &token, "한글 자료").await;
    let meeting_id = meeting["id"].as_i64().unwrap();

    let attachment =
        upload_attachment(&pool, &token, meeting_id, "회의록.txt", "한글 내용").await;
    let attachment_id = attachment["id"].as_i64().unwrap();

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/attachments/{attachment_id}/download"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()["content-disposition"].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename*=UTF-8''"), "got: {disposition}");
}

/// Deleting an attachment removes its row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_attachment(pool: PgPool) {
    let token = member_token(&pool, "meet-detach@test.com").await;
    let meeting = create_meeting(&pool, &token, "정리 회의").await;
    let meeting_id = meeting["id"].as_i64().unwrap();
    let attachment = upload_attachment(&pool, &token, meeting_id, "old.txt", "stale").await;
    let attachment_id = attachment["id"].as_i64().unwrap();

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/attachments/{attachment_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/attachments/{attachment_id}/download"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Comments attach to any known entity type and list in conversation order.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_lifecycle(pool: PgPool) {
    let token = member_token(&pool, "comment-life@test.com").await;
    let meeting = create_meeting(&pool, &token, "댓글 회의").await;
    let meeting_id = meeting["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "entity_type": "meeting", "entity_id": meeting_id, "content": "첫 댓글"
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/comments",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let comment = body_json(response).await;
    let comment_id = comment["id"].as_i64().unwrap();

    // Author can edit.
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/comments/{comment_id}"),
        serde_json::json!({ "content": "수정된 댓글" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["content"], "수정된 댓글");

    // Unknown entity types are rejected.
    let body = serde_json::json!({
        "entity_type": "invoice", "entity_id": 1, "content": "잘못된 대상"
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/comments",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/comments/{comment_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// The nested meeting comment routes post and list against the meeting
/// itself, interchangeably with the flat `/comments` endpoint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_meeting_nested_comments(pool: PgPool) {
    let token = member_token(&pool, "comment-nested@test.com").await;
    let meeting = create_meeting(&pool, &token, "중첩 댓글 회의").await;
    let meeting_id = meeting["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/meetings/{meeting_id}/comments"),
        serde_json::json!({ "content": "회의록 남깁니다" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let comment = body_json(response).await;
    assert_eq!(comment["entity_type"], "meeting");
    assert_eq!(comment["entity_id"], meeting_id);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/meetings/{meeting_id}/comments"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["content"], "회의록 남깁니다");

    // Both views are the same comment store.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/comments?entity_type=meeting&entity_id={meeting_id}"),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    // A missing meeting is a 404, not an orphaned comment.
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/meetings/9999/comments",
        serde_json::json!({ "content": "유령 회의" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Only the author may edit; another 팀원 gets 403.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_author_only_edit(pool: PgPool) {
    let author = member_token(&pool, "comment-author@test.com").await;
    let stranger = member_token(&pool, "comment-other@test.com").await;
    let meeting = create_meeting(&pool, &author, "권한 회의").await;
    let meeting_id = meeting["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "entity_type": "meeting", "entity_id": meeting_id, "content": "내 댓글"
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/comments",
        body,
        &author,
    )
    .await;
    let comment_id = body_json(response).await["id"].as_i64().unwrap();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/comments/{comment_id}"),
        serde_json::json!({ "content": "남의 댓글 수정" }),
        &stranger,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A non-author 팀원 cannot delete either; an admin can.
    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/comments/{comment_id}"),
        &stranger,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = common::admin_token(&pool, "comment-admin@test.com").await;
    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/comments/{comment_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
