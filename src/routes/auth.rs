// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password authentication routes.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE, SESSION_TTL_SECS};
use crate::models::NewUser;
use crate::services::password::{hash_password, verify_password};
use crate::time_utils::{now_rfc3339, today};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for register and login.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub user_id: String,
    pub token: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Cookies are marked `Secure` unless the frontend is served from localhost.
fn is_local_frontend(frontend_url: &str) -> bool {
    frontend_url.starts_with("http://localhost") || frontend_url.starts_with("http://127.0.0.1")
}

fn session_cookie(token: String, frontend_url: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!is_local_frontend(frontend_url))
        .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64))
        .build()
}

fn session_cookie_removal(frontend_url: &str) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!is_local_frontend(frontend_url))
        .build()
}

fn issue_token(state: &AppState, user_id: &str) -> Result<String> {
    create_jwt(user_id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))
}

/// Create an account and start a session.
///
/// Progression is initialized best-effort after the account is stored;
/// `/api/user/initialize` or the first completion creates it otherwise.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(mut payload), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>)> {
    payload.email = normalize_email(&payload.email);
    payload.validate()?;

    let iterations = state.config.password_hash_iterations;
    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, iterations))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(e.into()))?;

    let user = state
        .store
        .create_user(NewUser {
            email: payload.email,
            password_hash,
        })
        .await?;

    // The account already exists at this point. A missing progression is
    // created on first use, so a failed write here must not fail the request.
    if let Err(e) = state
        .quest_service
        .initialize(
            state.store.as_ref(),
            &user.id,
            today(state.config.day_offset_minutes),
        )
        .await
    {
        tracing::warn!(user_id = %user.id, error = %e, "Failed to initialize progression");
    }

    tracing::info!(user_id = %user.id, "Account registered");

    let token = issue_token(&state, &user.id)?;
    let jar = jar.add(session_cookie(token.clone(), &state.config.frontend_url));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(SessionResponse {
            user_id: user.id,
            token,
        }),
    ))
}

/// Verify credentials and start a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let email = normalize_email(&payload.email);
    let Some(mut user) = state.store.get_user_by_email(&email).await? else {
        tracing::debug!("Login for unknown email");
        return Err(AppError::InvalidCredentials);
    };

    let stored_hash = user.password_hash.clone();
    let password = payload.password;
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(e.into()))?;

    if !valid {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    user.last_active = now_rfc3339();
    if let Err(e) = state.store.upsert_user(&user).await {
        tracing::warn!(user_id = %user.id, error = %e, "Failed to update last_active");
    }

    let token = issue_token(&state, &user.id)?;
    let jar = jar.add(session_cookie(token.clone(), &state.config.frontend_url));

    tracing::info!(user_id = %user.id, "Login successful");
    Ok((
        jar,
        Json(SessionResponse {
            user_id: user.id,
            token,
        }),
    ))
}

/// Clear the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (StatusCode, CookieJar) {
    let jar = jar.remove(session_cookie_removal(&state.config.frontend_url));
    (StatusCode::NO_CONTENT, jar)
}
