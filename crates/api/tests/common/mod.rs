#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use stationhub_api::auth::jwt::JwtConfig;
use stationhub_api::config::ServerConfig;
use stationhub_api::router::build_app_router;
use stationhub_api::state::AppState;
use stationhub_core::upload::DEFAULT_MAX_UPLOAD_BYTES;

pub const TEST_PASSWORD: &str = "inspect-all-the-things";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_dir: PathBuf, max_upload_bytes: u64) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir,
        max_upload_bytes,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
///
/// Uploads go to a scratch directory under the system temp dir.
pub fn build_test_app(pool: PgPool) -> Router {
    let dir = std::env::temp_dir().join(format!("stationhub-test-{}", uuid::Uuid::new_v4()));
    build_test_app_with_uploads(pool, &dir, DEFAULT_MAX_UPLOAD_BYTES)
}

/// Build the application router writing uploads to `upload_dir`.
pub fn build_test_app_with_uploads(pool: PgPool, upload_dir: &Path, max_bytes: u64) -> Router {
    let config = test_config(upload_dir.to_path_buf(), max_bytes);
    build_app_router(AppState::new(pool, config.clone()), &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// POST a single-file multipart form.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    field_name: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
    token: &str,
) -> Response<Body> {
    let boundary = "stationhub-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register `email` via the API and return its access token.
pub async fn register(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register `email` as a superuser and return an admin access token.
pub async fn register_admin(app: Router, pool: &PgPool, email: &str) -> String {
    register(app.clone(), email).await;
    sqlx::query("UPDATE users SET is_superuser = TRUE WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await
        .unwrap();

    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a station through the API and return its id.
pub async fn create_station(app: Router, token: &str, body: Value) -> i64 {
    let response = post_json_auth(app, "/api/v1/stations", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Record an inspection through the API and return its id.
pub async fn create_inspection(app: Router, token: &str, station_id: i64, body: Value) -> i64 {
    let uri = format!("/api/v1/stations/{station_id}/inspections");
    let response = post_json_auth(app, &uri, body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
