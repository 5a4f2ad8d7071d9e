//! HTTP-level integration tests for login, token refresh, logout and
//! account lockout.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, get, get_auth, post_auth, post_json, token_for, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

async fn login(app: axum::Router, username: &str, password: &str) -> axum::response::Response {
    post_json(
        app,
        "/auth/login",
        json!({ "username": username, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_user(&pool, "loginuser").await;
    let app = common::build_test_app(pool);

    let response = login(app, "loginuser", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["email"], "loginuser@test.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    create_user(&pool, "wrongpw").await;
    let app = common::build_test_app(pool);

    let response = login(app, "wrongpw", "incorrect_password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid username or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = login(app, "nobody", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_account_locks_after_five_failures(pool: PgPool) {
    create_user(&pool, "locked").await;
    let app = common::build_test_app(pool);

    for _ in 0..5 {
        let response = login(app.clone(), "locked", "bad-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused while locked.
    let response = login(app, "locked", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_lock_starts_a_fresh_count(pool: PgPool) {
    let user = create_user(&pool, "returning").await;
    sqlx::query(
        "UPDATE users SET failed_login_count = 5, locked_until = NOW() - INTERVAL '1 minute'
         WHERE id = $1",
    )
    .bind(user.id)
    .execute(&pool)
    .await
    .unwrap();
    let app = common::build_test_app(pool.clone());

    // One more mistake after the lock lapsed must not lock the account again.
    let response = login(app.clone(), "returning", "bad-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (count, locked_until): (i32, Option<chrono::DateTime<chrono::Utc>>) =
        sqlx::query_as("SELECT failed_login_count, locked_until FROM users WHERE id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
    assert!(locked_until.is_none());

    let response = login(app, "returning", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_records_client(pool: PgPool) {
    let user = create_user(&pool, "traveller").await;
    let app = common::build_test_app(pool.clone());

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .header("user-agent", "pantry-tests/1.0")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .body(axum::body::Body::from(
            json!({ "username": "traveller", "password": TEST_PASSWORD }).to_string(),
        ))
        .unwrap();
    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (user_agent, ip_address): (Option<String>, Option<String>) =
        sqlx::query_as("SELECT user_agent, ip_address FROM user_sessions WHERE user_id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(user_agent.as_deref(), Some("pantry-tests/1.0"));
    assert_eq!(ip_address.as_deref(), Some("203.0.113.7"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    create_user(&pool, "refresher").await;
    let app = common::build_test_app(pool);

    let tokens = body_json(login(app.clone(), "refresher", TEST_PASSWORD).await).await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], tokens["refresh_token"]);

    // The old refresh token was revoked by the rotation.
    let response = post_json(
        app,
        "/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let user = create_user(&pool, "leaver").await;
    let app = common::build_test_app(pool);

    let tokens = body_json(login(app.clone(), "leaver", TEST_PASSWORD).await).await;

    let response = post_auth(app.clone(), "/auth/logout", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app,
        "/auth/refresh",
        json!({ "refresh_token": tokens["refresh_token"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::send(
        app,
        axum::http::Request::builder()
            .method("POST")
            .uri("/auth/logout")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_token_rejected_where_auth_is_optional(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Anonymous access to the listing is fine...
    let response = get(app.clone(), "/recipes").await;
    assert_eq!(response.status(), StatusCode::OK);

    // ...but a token that does not verify is an error, not "anonymous".
    let response = get_auth(app, "/recipes", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_login_body_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/auth/login", json!({ "username": "x" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
