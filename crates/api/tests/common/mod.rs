#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use creatorhub_api::config::ServerConfig;
use creatorhub_api::router::build_app_router;
use creatorhub_api::state::AppState;

/// Boundary used by [`post_multipart`].
pub const BOUNDARY: &str = "----creatorhub-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as the only CORS origin and a small upload
/// limit so size checks are cheap to exercise.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 64 * 1024,
        db_max_connections: 5,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Same builder `main.rs` uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState { pool }, &test_config())
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// A part of a multipart form: `(field name, optional file name, content)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

/// Encode parts as a `multipart/form-data` body.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A complete registration payload for a photographer.
pub fn registration_payload(email: &str) -> Value {
    serde_json::json!({
        "creator_type": "photographer",
        "full_name": "Kiran Shutter",
        "email": email,
        "phone": "555-0199",
        "location": "Mumbai",
        "experience": "7 years",
        "equipment": "Full-frame kit",
        "bio": "Editorial and events",
        "website": "https://kiran.example",
        "instagram": "@kiran",
        "availability": "Any day",
    })
}

/// Register a creator through the API and return its id.
pub async fn register(pool: &PgPool, payload: Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/register", payload).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["creator_id"].as_i64().unwrap()
}
