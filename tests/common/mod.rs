//! Shared helpers for HTTP-level tests. Requests go straight to the router via
//! `tower::ServiceExt::oneshot`, no TCP listener involved.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use movie_catalog::{
    apply_migrations, build_router, connect_in_memory, AppState, CatalogStore, MemoryStore,
    ReferencePolicy, Settings, SqliteStore,
};
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh in-memory SQLite database with the default policy.
pub async fn sqlite_app() -> Router {
    sqlite_app_with_policy(ReferencePolicy::Ignore).await
}

pub async fn sqlite_app_with_policy(policy: ReferencePolicy) -> Router {
    let pool = connect_in_memory().await.expect("in-memory database");
    apply_migrations(&pool).await.expect("schema");
    build_test_app(Arc::new(SqliteStore::new(pool)), policy)
}

/// Router whose SQLite pool is already closed; every store call fails.
pub async fn closed_sqlite_app() -> Router {
    let pool = connect_in_memory().await.expect("in-memory database");
    apply_migrations(&pool).await.expect("schema");
    pool.close().await;
    build_test_app(Arc::new(SqliteStore::new(pool)), ReferencePolicy::Ignore)
}

/// Router over the in-process store.
pub fn memory_app(policy: ReferencePolicy) -> Router {
    build_test_app(Arc::new(MemoryStore::new()), policy)
}

pub fn build_test_app(store: Arc<dyn CatalogStore>, policy: ReferencePolicy) -> Router {
    build_router(AppState::new(store, policy), &Settings::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// POST an arbitrary body labelled as JSON.
pub async fn post_raw(app: &Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
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

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
