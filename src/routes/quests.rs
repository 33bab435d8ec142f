// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest assignment and completion routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::QuestTemplate;
use crate::services::progression::CompletionRequest;
use crate::services::quests::{CompletionOutcome, DailyAssignment};
use crate::time_utils::today;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/quests/assign", post(assign))
        .route("/api/quests/complete", post(complete))
        .route("/api/quests/daily", get(daily_set))
}

/// Today's rotating quests. Stable for the rest of the day once drawn.
async fn assign(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DailyAssignment>> {
    let mut rng = StdRng::from_entropy();
    let assignment = state
        .quest_service
        .assign_daily(
            state.store.as_ref(),
            &user.user_id,
            today(state.config.day_offset_minutes),
            &mut rng,
        )
        .await?;

    Ok(Json(assignment))
}

/// Submit a daily set or individual quest completion.
async fn complete(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(request), _): WithRejection<Json<CompletionRequest>, AppError>,
) -> Result<Json<CompletionOutcome>> {
    let outcome = state
        .quest_service
        .apply_completion(
            state.store.as_ref(),
            &user.user_id,
            request,
            today(state.config.day_offset_minutes),
        )
        .await?;

    Ok(Json(outcome))
}

/// The fixed daily strength set.
async fn daily_set(State(state): State<Arc<AppState>>) -> Json<Vec<QuestTemplate>> {
    Json(state.quest_service.catalog().daily_set().to_vec())
}
