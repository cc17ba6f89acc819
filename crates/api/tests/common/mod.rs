//! Shared test harness for HTTP-level integration tests.
//!
//! [`build_test_app`] mirrors the router construction in `main.rs`
//! (via [`moim_api::router::build_app_router`]) so integration tests
//! exercise the same middleware stack (CORS, request ID, timeout,
//! tracing, panic recovery) that production uses.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use moim_api::auth::jwt::JwtConfig;
use moim_api::auth::password::hash_password;
use moim_api::config::ServerConfig;
use moim_api::router::build_app_router;
use moim_api::state::AppState;
use moim_db::models::user::CreateUser;
use moim_db::repositories::{RoleRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses a fixed JWT secret (never read from the environment, so tests
/// are hermetic) and a temp-dir upload root. AI diagnostics and SMTP
/// mail are left unconfigured.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: std::env::temp_dir().join("moim-test-uploads"),
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        ai: None,
        email: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        diagnostics: None,
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body, without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a PUT request with a JSON body and a bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database and return `(user_id, password)`.
///
/// `role_name` is 관리자 or 팀원 (seeded by the role migration).
pub async fn create_test_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    role_name: &str,
) -> (i64, String) {
    let password = "test-password-1";
    let hashed = hash_password(password).expect("hashing should succeed");
    let role = RoleRepo::find_by_name(pool, role_name)
        .await
        .expect("role lookup should succeed")
        .expect("seeded role should exist");

    let input = CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        initials: name.chars().take(2).collect::<String>().to_uppercase(),
        password_hash: hashed,
        role_id: role.id,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user.id, password.to_string())
}

/// Log in via the API and return the JSON session payload
/// (`access_token`, `refresh_token`, `user`).
pub async fn login_user(app: Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Create a member user and return their access token.
pub async fn member_token(pool: &PgPool, email: &str) -> String {
    let (_id, password) = create_test_user(pool, "팀원테스트", email, "팀원").await;
    let json = login_user(build_test_app(pool.clone()), email, &password).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Create an admin user and return their access token.
pub async fn admin_token(pool: &PgPool, email: &str) -> String {
    let (_id, password) = create_test_user(pool, "관리자테스트", email, "관리자").await;
    let json = login_user(build_test_app(pool.clone()), email, &password).await;
    json["access_token"].as_str().unwrap().to_string()
}
