// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::UserProgression;
use crate::services::leveling::LevelInfo;
use crate::services::progression::quests_remaining;
use crate::time_utils::today;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/user/username", post(set_username))
        .route("/api/user/initialize", post(initialize))
        .route("/api/progression", get(get_progression))
        .merge(super::quests::routes())
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
    pub username: Option<String>,
    pub created_at: String,
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .store
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(UserResponse {
        user_id: profile.id,
        email: profile.email,
        username: profile.username,
        created_at: profile.created_at,
    }))
}

// ─── Username ────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct UsernameRequest {
    #[validate(
        length(min = 1, max = 10, message = "must be 1-10 characters"),
        custom(function = "username_chars")
    )]
    pub username: String,
}

fn username_chars(username: &str) -> std::result::Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_chars")
            .with_message("only letters, digits and underscores are allowed".into()))
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UsernameResponse {
    pub username: String,
}

/// Choose or change the public username.
async fn set_username(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(mut payload), _): WithRejection<Json<UsernameRequest>, AppError>,
) -> Result<Json<UsernameResponse>> {
    payload.username = payload.username.trim().to_string();
    payload.validate()?;

    let mut profile = state
        .store
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    let wanted_lower = payload.username.to_lowercase();
    let unchanged = profile.username_lower.as_deref() == Some(wanted_lower.as_str());
    if !unchanged && state.store.is_username_taken(&payload.username).await? {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    profile.username = Some(payload.username.clone());
    profile.username_lower = Some(wanted_lower);
    state.store.upsert_user(&profile).await?;

    tracing::info!(user_id = %user.user_id, username = %payload.username, "Username set");
    Ok(Json(UsernameResponse {
        username: payload.username,
    }))
}

// ─── Progression ─────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InitializeResponse {
    pub progression: UserProgression,
    pub level: LevelInfo,
    pub was_initialized: bool,
}

/// Create progression if missing and persist the daily reset.
async fn initialize(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<InitializeResponse>> {
    let day = today(state.config.day_offset_minutes);
    let (progression, was_initialized) = state
        .quest_service
        .initialize(state.store.as_ref(), &user.user_id, day)
        .await?;

    let level = state.quest_service.level(&progression);
    Ok(Json(InitializeResponse {
        progression,
        level,
        was_initialized,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressionResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub progression: UserProgression,
    pub level: LevelInfo,
    /// Assigned quests for today not yet completed
    pub quests_remaining: Vec<String>,
}

/// Read-only progression snapshot as of today.
async fn get_progression(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProgressionResponse>> {
    let day = today(state.config.day_offset_minutes);
    let progression = state
        .quest_service
        .progression_snapshot(state.store.as_ref(), &user.user_id, day)
        .await?;

    let level = state.quest_service.level(&progression);
    let remaining = quests_remaining(&progression, day);
    Ok(Json(ProgressionResponse {
        date: day,
        progression,
        level,
        quests_remaining: remaining,
    }))
}
