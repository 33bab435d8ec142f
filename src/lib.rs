// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest Leveling: a gamified habit tracker backend
//!
//! Users complete a fixed daily strength set and rotating quests to earn
//! experience, raise stats and keep a daily streak alive.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::UserStore;
use services::QuestService;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn UserStore>,
    pub quest_service: QuestService,
}
