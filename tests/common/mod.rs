// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use quest_leveling::config::Config;
use quest_leveling::db::{FirestoreDb, MemoryDb, UserStore};
use quest_leveling::middleware::auth::create_jwt;
use quest_leveling::routes::create_router;
use quest_leveling::services::{QuestCatalog, QuestService};
use quest_leveling::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build an app over the given store with test config.
#[allow(dead_code)]
pub fn create_test_app_with_store(store: Arc<dyn UserStore>) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let catalog = QuestCatalog::builtin().expect("builtin catalog");

    let state = Arc::new(AppState {
        config,
        store,
        quest_service: QuestService::new(catalog),
    });

    (create_router(state.clone()), state)
}

/// Create a test app backed by a fresh in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_store(Arc::new(MemoryDb::new()))
}

/// Create a test app whose store is disconnected.
#[allow(dead_code)]
pub fn create_offline_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_store(Arc::new(FirestoreDb::new_mock()))
}

/// Session token for `user_id` signed with the app's key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("Failed to create JWT")
}

/// Build a JSON request, optionally authenticated.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Send a request and decode the JSON body.
#[allow(dead_code)]
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Register a user through the API and return `(user_id, token)`.
#[allow(dead_code)]
pub async fn register(app: &axum::Router, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/auth/register",
            None,
            serde_json::json!({ "email": email, "password": "correct-horse" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    (
        body["user_id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}
