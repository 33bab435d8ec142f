// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod leveling;
pub mod password;
pub mod progression;
pub mod quests;
pub mod selector;

pub use catalog::{CatalogError, QuestCatalog};
pub use leveling::{level_of, LevelInfo};
pub use progression::{CompletionRequest, ProgressionError};
pub use quests::QuestService;
