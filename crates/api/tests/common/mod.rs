#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use storygrid_core::moves::MovePolicy;
use storygrid_db::DbPool;
use tower::ServiceExt;

use storygrid_api::config::ServerConfig;
use storygrid_api::router::build_app_router;
use storygrid_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        move_policy: MovePolicy::Swap,
        log_json: false,
    }
}

/// A fresh, migrated in-memory database.
pub async fn test_pool() -> DbPool {
    let pool = storygrid_db::create_in_memory_pool().await.unwrap();
    storygrid_db::run_migrations(&pool).await.unwrap();
    pool
}

/// Build the full application router over `pool`, with the same middleware
/// stack production uses.
pub fn build_test_app(pool: DbPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: DbPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Send a raw, possibly malformed JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST `body` to `uri`, assert 201 and return the `id` of the created row.
pub async fn create(app: Router, uri: &str, body: serde_json::Value) -> String {
    let response = post_json(app, uri, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}
