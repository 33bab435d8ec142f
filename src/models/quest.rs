// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest catalog entries and skill categories.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Skill category, which is also the name of the stat a quest rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Category {
    /// Fixed daily set only
    Strength,
    Agility,
    Vitality,
    Intelligence,
    Sense,
}

impl Category {
    /// Categories whose quests are drawn at random each day, in display order.
    pub const ROTATING: [Category; 4] = [
        Category::Agility,
        Category::Vitality,
        Category::Intelligence,
        Category::Sense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Strength => "strength",
            Category::Agility => "agility",
            Category::Vitality => "vitality",
            Category::Intelligence => "intelligence",
            Category::Sense => "sense",
        }
    }

    pub fn is_rotating(&self) -> bool {
        !matches!(self, Category::Strength)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable quest definition loaded at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct QuestTemplate {
    /// Stable identifier (used for matching and persistence)
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: Category,
    /// Numeric goal, e.g. 100 (reps)
    pub target: u32,
    #[serde(default)]
    pub unit: Option<String>,
    pub experience_reward: u32,
    /// Added to the stat named by `category`
    pub stat_reward: u32,
    /// Clients collect a free-text note for this quest. Never validated.
    #[serde(default)]
    pub requires_note: bool,
}
