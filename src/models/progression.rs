// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user progression state.
//!
//! Stored at: `progressions/{user_id}`
//!
//! Level is never stored. It is derived from `cumulative_experience`
//! whenever it is displayed (see `services::leveling`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::quest::Category;

/// Starting value for every stat on a fresh account.
pub const DEFAULT_STAT_VALUE: u32 = 10;

/// Stat values, one per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Stats {
    pub strength: u32,
    pub agility: u32,
    pub vitality: u32,
    pub intelligence: u32,
    pub sense: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STAT_VALUE,
            agility: DEFAULT_STAT_VALUE,
            vitality: DEFAULT_STAT_VALUE,
            intelligence: DEFAULT_STAT_VALUE,
            sense: DEFAULT_STAT_VALUE,
        }
    }
}

impl Stats {
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Strength => self.strength,
            Category::Agility => self.agility,
            Category::Vitality => self.vitality,
            Category::Intelligence => self.intelligence,
            Category::Sense => self.sense,
        }
    }

    /// Add `amount` to the stat for `category`, saturating at `u32::MAX`.
    pub fn add(&mut self, category: Category, amount: u32) {
        let slot = match category {
            Category::Strength => &mut self.strength,
            Category::Agility => &mut self.agility,
            Category::Vitality => &mut self.vitality,
            Category::Intelligence => &mut self.intelligence,
            Category::Sense => &mut self.sense,
        };
        *slot = slot.saturating_add(amount);
    }
}

/// Quests drawn for a specific calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AssignedQuests {
    pub date: NaiveDate,
    /// Ordered quest IDs
    pub quest_ids: Vec<String>,
}

/// Mutable progression state owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProgression {
    // ─── Rewards ─────────────────────────────────────────────────
    /// Total experience ever earned (never decreases)
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub cumulative_experience: u64,
    #[serde(default)]
    pub stats: Stats,

    // ─── Streak ──────────────────────────────────────────────────
    /// Consecutive-day streak, advanced by daily set completions.
    /// A day with only an individual completion keeps it alive.
    #[serde(default)]
    pub streak_days: u32,
    /// Date of the most recent daily set completion. Decides the streak
    /// when an individual quest was already completed the same day.
    #[serde(default)]
    pub last_daily_completion_date: Option<NaiveDate>,

    // ─── Per-day tracking ────────────────────────────────────────
    /// Date of the most recent completion of any kind.
    /// `completed_today` and `daily_set_completed_today` refer to this date.
    #[serde(default)]
    pub last_completion_date: Option<NaiveDate>,
    /// IDs of individual quests completed on `last_completion_date`
    #[serde(default)]
    pub completed_today: Vec<String>,
    #[serde(default)]
    pub daily_set_completed_today: bool,
    #[serde(default)]
    pub assigned_quests: Option<AssignedQuests>,

    // ─── Metadata ────────────────────────────────────────────────
    /// Last write timestamp (RFC 3339)
    #[serde(default)]
    pub updated_at: String,
}

impl Default for UserProgression {
    fn default() -> Self {
        Self {
            cumulative_experience: 0,
            stats: Stats::default(),
            streak_days: 0,
            last_daily_completion_date: None,
            last_completion_date: None,
            completed_today: Vec::new(),
            daily_set_completed_today: false,
            assigned_quests: None,
            updated_at: String::new(),
        }
    }
}
