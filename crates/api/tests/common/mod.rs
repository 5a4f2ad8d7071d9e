#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pantry_api::auth::jwt::{generate_access_token, JwtConfig};
use pantry_api::auth::password::hash_password;
use pantry_api::config::{MediaConfig, ServerConfig, SiteConfig};
use pantry_api::router::build_app_router;
use pantry_api::state::AppState;
use pantry_db::models::user::{CreateUser, User};
use pantry_db::repositories::UserRepo;

/// Password given to every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and `media_root` for uploads.
pub fn test_config(media_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        media: MediaConfig {
            root: media_root,
            max_upload_bytes: 64 * 1024,
        },
        site: SiteConfig {
            owner_name: "Kash".to_string(),
            interests: vec!["Coding".to_string(), "Teaching".to_string()],
        },
    }
}

/// Build the full application router, using the given database pool.
///
/// Goes through [`build_app_router`] so tests exercise the same middleware
/// stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_media(pool, std::env::temp_dir().join("pantry-api-tests"))
}

/// Like [`build_test_app`] with uploads written under `media_root`.
pub fn build_test_app_with_media(pool: PgPool, media_root: PathBuf) -> Router {
    let config = test_config(media_root);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user (with their chef profile) directly in the database.
pub async fn create_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: Some(format!("{username}@test.com")),
        first_name: String::new(),
        last_name: String::new(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    UserRepo::create_with_chef(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// An access token for `user`, signed with the test secret.
pub fn token_for(user: &User) -> String {
    let config = test_config(PathBuf::new());
    generate_access_token(user.id, &user.username, &config.jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn request(method: Method, uri: &str, token: Option<&str>, json: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match json {
        Some(value) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

/// POST with no body, e.g. confirming a delete.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::POST, uri, Some(token), None)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, request(Method::PATCH, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
