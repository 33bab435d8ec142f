// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication and CORS tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests without valid tokens
//! 2. Registration, login and logout issue and clear sessions
//! 3. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{json_request, send};

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _) = common::create_test_app();

    let (status, body) = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/api/progression")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _) = common::create_test_app();

    let (status, body) = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/api/progression")
            .header(header::AUTHORIZATION, "Bearer invalid.token.here")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let (app, _) = common::create_test_app();
    let token = common::create_test_jwt("someone", b"a_completely_different_signing_key");

    let (status, _) = send(&app, json_request("GET", "/api/me", Some(&token), json!(null))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
    let (app, state) = common::create_test_app();
    let (user_id, _) = common::register(&app, "cookie@example.com").await;
    let token = common::create_test_jwt(&user_id, &state.config.jwt_signing_key);

    let (status, body) = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/api/me")
            .header(header::COOKIE, format!("leveling_token={}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id.as_str());
    assert_eq!(body["email"], "cookie@example.com");
}

#[tokio::test]
async fn test_register_then_login() {
    let (app, _) = common::create_test_app();
    let (user_id, _) = common::register(&app, "Hero@Example.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "email": "hero@example.com", "password": "correct-horse" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("leveling_token="));
    assert!(cookie.contains("HttpOnly"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["user_id"], user_id.as_str());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (app, _) = common::create_test_app();
    common::register(&app, "hero@example.com").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "email": "hero@example.com", "password": "wrong-horse" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (app, _) = common::create_test_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "email": "ghost@example.com", "password": "whatever" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (app, _) = common::create_test_app();
    common::register(&app, "twice@example.com").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            None,
            json!({ "email": "TWICE@example.com", "password": "another-pass" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_register_validation() {
    let (app, _) = common::create_test_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            None,
            json!({ "email": "not-an-email", "password": "secret" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            None,
            json!({ "email": "short@example.com", "password": "12345" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_malformed_body() {
    let (app, _) = common::create_test_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            None,
            json!({ "email": "nopass@example.com" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, "leveling_token=test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cookie.starts_with("leveling_token="));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/progression")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    // Should have CORS headers
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let (app, _) = common::create_test_app();

    let (status, body) = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    // Health should be accessible without auth
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["quest_count"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_unknown_path_is_json_not_found() {
    let (app, _) = common::create_test_app();

    let (status, body) = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/api/nope")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}
