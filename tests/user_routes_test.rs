// ABOUTME: Integration tests for registration, login, and the profile endpoint
// ABOUTME: Covers duplicate emails, uniform credential errors, and auth enforcement
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::{register_and_login, send, test_app};
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_register_login_me_flow() {
    let app = test_app();
    let token = register_and_login(&app, "athlete@example.com").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/users/me",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "athlete@example.com");
    assert_eq!(body["name"], "Athlete");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = test_app();
    register_and_login(&app, "athlete@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/register",
        None,
        Some(json!({
            "email": "Athlete@Example.com",
            "password": "SecurePass123!",
            "name": "Copycat",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Email already registered");
}

#[tokio::test]
async fn test_registration_validation_lists_all_fields() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/register",
        None,
        Some(json!({
            "email": "not-an-email",
            "password": "short",
            "name": "",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app();
    register_and_login(&app, "athlete@example.com").await;

    let (unknown_status, unknown_body) = send(
        &app,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "SecurePass123!"})),
    )
    .await;
    let (wrong_status, wrong_body) = send(
        &app,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({"email": "athlete@example.com", "password": "wrong-password"})),
    )
    .await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_body["error"]["message"], wrong_body["error"]["message"]);
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = test_app();

    let (status, _) = send(&app, Method::GET, "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/users/me",
        Some("not.a.token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
