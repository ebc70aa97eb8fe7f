//! HTTP-level tests for registration, login, and the current-user endpoint.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, delete_auth, get_auth, post_json, register, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;
use stationhub_db::repositories::UserRepo;
use tower::ServiceExt;

#[sqlx::test(migrations = "../db/migrations")]
async fn register_returns_token_and_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "email": "Ana@Example.com", "password": TEST_PASSWORD, "full_name": "Ana" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "bearer");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["email"], "ana@example.com");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_is_a_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "dup@example.com").await;

    let body = json!({ "email": "DUP@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn weak_password_and_bad_email_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "email": "short@example.com", "password": "abc" });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "email": "not-an-email", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_and_me(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "me@example.com").await;

    let body = json!({ "email": "me@example.com", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], "me@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "pw@example.com").await;

    let body = json!({ "email": "pw@example.com", "password": "definitely-wrong" });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json!({ "email": "nobody@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/me", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivated_account_cannot_log_in(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = register(app.clone(), "gone@example.com").await;

    let response = delete_auth(app.clone(), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let user = UserRepo::find_by_email(&pool, "gone@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!user.is_active);

    let body = json!({ "email": "gone@example.com", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.clone(), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = delete_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bearer_scheme_is_case_insensitive(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "scheme@example.com").await;

    for header in [format!("bearer {token}"), format!("BEARER {token}")] {
        let request = Request::builder()
            .uri("/api/v1/auth/me")
            .header("authorization", header)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    for header in ["Basic abc", "Bearer ", "Bearer"] {
        let request = Request::builder()
            .uri("/api/v1/auth/me")
            .header("authorization", header)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{header}");
    }
}
