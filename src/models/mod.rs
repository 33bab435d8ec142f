// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod progression;
pub mod quest;
pub mod user;

pub use progression::{AssignedQuests, Stats, UserProgression};
pub use quest::{Category, QuestTemplate};
pub use user::{NewUser, User};
