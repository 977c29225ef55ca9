//! Shared helpers for the integration test binaries.
#![allow(dead_code)]

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;

use todo_api::config::{AppConfig, DatabaseConfig, SecurityConfig, ServerConfig};
use todo_api::database::manager;
use todo_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

fn test_config(url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig { port: 0 },
        database: DatabaseConfig {
            url: url.to_string(),
            max_connections: 2,
            connect_timeout_secs: 5,
        },
        security: SecurityConfig {
            jwt_secret: TEST_SECRET.to_string(),
            token_expiry_secs: 3600,
            bcrypt_cost: 4,
        },
    }
}

/// Router over a lazily-connected pool: every path that never reaches
/// storage runs without a database.
pub fn test_app() -> axum::Router {
    let url = "postgres://postgres@localhost/todo_api_test";
    let pool = PgPoolOptions::new().connect_lazy(url).expect("lazy pool");
    app(AppState::new(pool, &test_config(url)))
}

/// Router over a live pool with migrations applied. Returns None when
/// DATABASE_URL is not set so live-store tests skip instead of failing.
pub async fn live_app() -> Result<Option<axum::Router>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping live-store test");
        return Ok(None);
    };

    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await?;
    manager::migrate(&pool).await?;
    Ok(Some(app(AppState::new(pool, &test_config(&url)))))
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

pub fn bearer_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
