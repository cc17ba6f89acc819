//! HTTP-level integration tests for the admin console, the user directory,
//! workspaces, and the unconfigured AI diagnostics path.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_test_user, delete_auth, get_auth, login_user, member_token,
    post_json, post_json_auth, put_json_auth,
};
use moim_db::repositories::RoleRepo;
use sqlx::PgPool;

async fn member_role_id(pool: &PgPool) -> i64 {
    RoleRepo::find_by_name(pool, "팀원")
        .await
        .expect("role lookup should succeed")
        .expect("seeded role should exist")
        .id
}

// ---------------------------------------------------------------------------
// Admin user management
// ---------------------------------------------------------------------------

/// Admin creates a user; the response carries resolved role and initials.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_create_user(pool: PgPool) {
    let admin = admin_token(&pool, "admin-create@test.com").await;
    let role_id = member_role_id(&pool).await;

    let body = serde_json::json!({
        "name": "박지민",
        "email": "new-member@test.com",
        "password": "password1",
        "role_id": role_id
    });
    let response =
        post_json_auth(common::build_test_app(pool.clone()), "/api/v1/admin/users", body, &admin)
            .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "박지민");
    assert_eq!(json["initials"], "박지");
    assert_eq!(json["role"], "팀원");
    assert!(json["is_active"].as_bool().unwrap());
    assert!(json.get("password_hash").is_none());

    // The new user can log in right away.
    login_user(common::build_test_app(pool), "new-member@test.com", "password1").await;
}

/// Creating a user with an unknown role returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_create_user_unknown_role(pool: PgPool) {
    let admin = admin_token(&pool, "admin-role@test.com").await;

    let body = serde_json::json!({
        "name": "무소속",
        "email": "roleless@test.com",
        "password": "password1",
        "role_id": 9999
    });
    let response =
        post_json_auth(common::build_test_app(pool), "/api/v1/admin/users", body, &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Renaming a user recomputes their initials.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_update_user_recomputes_initials(pool: PgPool) {
    let admin = admin_token(&pool, "admin-rename@test.com").await;
    let (user_id, _) = create_test_user(&pool, "이전이름", "rename@test.com", "팀원").await;

    let body = serde_json::json!({ "name": "최유리" });
    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/admin/users/{user_id}"),
        body,
        &admin,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "최유리");
    assert_eq!(json["initials"], "최유");
}

/// Deactivation kills logins and existing sessions.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_deactivate_user(pool: PgPool) {
    let admin = admin_token(&pool, "admin-deact@test.com").await;
    let (user_id, password) = create_test_user(&pool, "비활성", "deact@test.com", "팀원").await;
    let session = login_user(common::build_test_app(pool.clone()), "deact@test.com", &password).await;
    let refresh_token = session["refresh_token"].as_str().unwrap();

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{user_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // New logins are refused.
    let body = serde_json::json!({ "email": "deact@test.com", "password": password });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Existing sessions are revoked.
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An admin cannot purge their own account.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_self_purge_guard(pool: PgPool) {
    let (admin_id, password) =
        create_test_user(&pool, "관리자", "self-purge@test.com", "관리자").await;
    let session =
        login_user(common::build_test_app(pool.clone()), "self-purge@test.com", &password).await;
    let token = session["access_token"].as_str().unwrap();

    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/admin/users/{admin_id}/purge"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Purging another user strips their assignments and removes the row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_purge_user(pool: PgPool) {
    let admin = admin_token(&pool, "admin-purge@test.com").await;
    let (user_id, _) = create_test_user(&pool, "삭제대상", "purged@test.com", "팀원").await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{user_id}/purge"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/admin/users/{user_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Purging a user leaves their content behind: projects and workspaces they
/// created survive with nulled audit columns, while their comments go with
/// them.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_purge_author_keeps_content(pool: PgPool) {
    let admin = admin_token(&pool, "purge-keep-admin@test.com").await;
    let (author_id, password) =
        create_test_user(&pool, "작성자", "purge-author@test.com", "팀원").await;
    let session =
        login_user(common::build_test_app(pool.clone()), "purge-author@test.com", &password).await;
    let author = session["access_token"].as_str().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/workspaces",
        serde_json::json!({ "name": "남겨질 팀" }),
        author,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let workspace_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/projects",
        serde_json::json!({ "name": "남겨질 프로젝트", "code": "KEEP-01" }),
        author,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/comments",
        serde_json::json!({
            "entity_type": "project",
            "entity_id": project_id,
            "content": "작성자의 마지막 말"
        }),
        author,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{author_id}/purge"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The project survives with its audit trail cleared.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["created_by"].is_null());

    // The workspace survives without an owner.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/workspaces/{workspace_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["owner_id"].is_null());

    // Their comments went with them.
    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/comments?entity_type=project&entity_id={project_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

/// Password reset installs the new password and revokes old sessions.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_reset_password(pool: PgPool) {
    let admin = admin_token(&pool, "admin-reset@test.com").await;
    let (user_id, old_password) =
        create_test_user(&pool, "초기화", "reset@test.com", "팀원").await;

    let body = serde_json::json!({ "new_password": "changed99" });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{user_id}/reset-password"),
        body,
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password no longer works; the new one does.
    let body = serde_json::json!({ "email": "reset@test.com", "password": old_password });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    login_user(common::build_test_app(pool), "reset@test.com", "changed99").await;
}

// ---------------------------------------------------------------------------
// User directory
// ---------------------------------------------------------------------------

/// The `/users` directory lists active users only, for any signed-in member.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_directory_active_only(pool: PgPool) {
    let admin = admin_token(&pool, "dir-admin@test.com").await;
    let member = member_token(&pool, "dir-member@test.com").await;
    let (inactive_id, _) =
        create_test_user(&pool, "비활성자", "dir-inactive@test.com", "팀원").await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{inactive_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(common::build_test_app(pool), "/api/v1/users", &member).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 2, "admin + member, inactive excluded");
    assert!(users.iter().all(|u| u["id"] != inactive_id));
    assert!(users.iter().all(|u| u["role"].is_string()));
}

// ---------------------------------------------------------------------------
// Workspaces
// ---------------------------------------------------------------------------

/// Members manage workspaces; deletion is admin-only.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_workspace_lifecycle(pool: PgPool) {
    let member = member_token(&pool, "ws-member@test.com").await;

    let body = serde_json::json!({ "name": "디자인팀" });
    let response =
        post_json_auth(common::build_test_app(pool.clone()), "/api/v1/workspaces", body, &member)
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let workspace = body_json(response).await;
    let id = workspace["id"].as_i64().unwrap();
    assert_eq!(workspace["name"], "디자인팀");

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/workspaces/{id}"),
        serde_json::json!({ "name": "제품팀" }),
        &member,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "제품팀");

    // 팀원 may not delete a workspace.
    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/workspaces/{id}"),
        &member,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = admin_token(&pool, "ws-admin@test.com").await;
    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/workspaces/{id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/workspaces/{id}"),
        &member,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting a workspace detaches its projects instead of deleting them.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_workspace_delete_detaches_projects(pool: PgPool) {
    let member = member_token(&pool, "ws-detach@test.com").await;
    let admin = admin_token(&pool, "ws-detach-admin@test.com").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/workspaces",
        serde_json::json!({ "name": "해체될 팀" }),
        &member,
    )
    .await;
    let workspace_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/projects",
        serde_json::json!({ "name": "살아남는 프로젝트", "code": "WS-01", "workspace_id": workspace_id }),
        &member,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project_id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/workspaces/{workspace_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project_id}"),
        &member,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["workspace_id"].is_null());
}

// ---------------------------------------------------------------------------
// AI diagnostics
// ---------------------------------------------------------------------------

/// Without an AI endpoint configured the diagnosis routes return 503.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_diagnostics_unconfigured(pool: PgPool) {
    let member = member_token(&pool, "ai-member@test.com").await;

    let body = serde_json::json!({ "project_id": 1 });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/ai/project",
        body,
        &member,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = serde_json::json!({ "user_id": 1 });
    let response =
        post_json_auth(common::build_test_app(pool), "/api/v1/ai/member", body, &member).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
