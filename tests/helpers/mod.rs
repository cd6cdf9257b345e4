// ABOUTME: Shared helpers for integration tests
// ABOUTME: Builds an in-memory server and drives it with oneshot requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs, dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use fittrack::config::{Environment, LogLevel, ServerConfig};
use fittrack::context::ServerResources;
use fittrack::routes;
use fittrack::store::MemoryDocumentStore;
use fittrack::tsdb::MemoryTimeSeriesStore;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Build a router backed by fresh in-memory stores
pub fn test_app() -> Router {
    let config = ServerConfig {
        http_port: 0,
        host: "127.0.0.1".to_owned(),
        environment: Environment::Testing,
        jwt_secret: "integration-test-secret".to_owned(),
        token_expiry_hours: 1,
        metrics_bucket: "fitness-test".to_owned(),
        log_level: LogLevel::Info,
    };
    routes::router(Arc::new(ServerResources::new(
        config,
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(MemoryTimeSeriesStore::new()),
    )))
}

/// Send one request and return the status plus parsed JSON body
///
/// Empty bodies (204 responses) come back as `Value::Null`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Register an account and log in, returning the bearer token
pub async fn register_and_login(app: &Router, email: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/users/register",
        None,
        Some(json!({
            "email": email,
            "password": "SecurePass123!",
            "name": "Athlete",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({
            "email": email,
            "password": "SecurePass123!",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_owned()
}
