// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Completion validation and reward application.
//!
//! Everything here is pure: functions take a progression snapshot and the
//! current calendar day and return a new progression. The input is never
//! modified, so a rejected request leaves stored state exactly as it was.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;

use crate::models::{Category, UserProgression};
use crate::services::catalog::QuestCatalog;
use crate::services::leveling::{level_of, LevelInfo};
use crate::time_utils::is_previous_day;

/// A completion submission, discriminated by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionRequest {
    /// The whole fixed daily strength set at once
    Daily { completed_quests: Vec<String> },
    /// A single quest from a rotating category
    Individual { completed_quests: Vec<String> },
}

/// Domain errors from the progression engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Already completed: {0}")]
    AlreadyCompleted(String),

    #[error("Unknown quest: {0}")]
    UnknownQuest(String),
}

/// Result of a successful completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub progression: UserProgression,
    pub level: LevelInfo,
}

/// Clear per-day completion tracking if it belongs to an earlier day.
///
/// Experience, stats, streak and assignment are left alone.
pub fn normalize(mut progression: UserProgression, today: NaiveDate) -> UserProgression {
    match progression.last_completion_date {
        None => progression,
        Some(date) if date == today => progression,
        Some(_) => {
            progression.completed_today.clear();
            progression.daily_set_completed_today = false;
            progression
        }
    }
}

/// Streak after completing the daily set on `today`.
///
/// `last_completion` is the date of the last completion of either kind.
/// Any completion on the previous day keeps the streak going. When an
/// individual quest was already completed earlier today, that date says
/// nothing about yesterday, so `last_daily` decides instead.
pub fn next_streak(
    last_completion: Option<NaiveDate>,
    last_daily: Option<NaiveDate>,
    today: NaiveDate,
    streak_days: u32,
) -> u32 {
    let previous = match last_completion {
        Some(prev) if prev == today => last_daily,
        other => other,
    };
    match previous {
        Some(prev) if is_previous_day(prev, today) => streak_days.saturating_add(1),
        _ => 1,
    }
}

/// Apply any completion request.
pub fn apply(
    current: &UserProgression,
    request: &CompletionRequest,
    catalog: &QuestCatalog,
    today: NaiveDate,
) -> Result<Completion, ProgressionError> {
    match request {
        CompletionRequest::Daily { completed_quests } => {
            complete_daily(current, completed_quests, catalog, today)
        }
        CompletionRequest::Individual { completed_quests } => {
            complete_individual(current, completed_quests, catalog, today)
        }
    }
}

/// Complete the fixed daily strength set.
pub fn complete_daily(
    current: &UserProgression,
    submitted: &[String],
    catalog: &QuestCatalog,
    today: NaiveDate,
) -> Result<Completion, ProgressionError> {
    let daily = catalog.daily_set();

    let submitted_ids: HashSet<&str> = submitted.iter().map(String::as_str).collect();
    let required_ids: HashSet<&str> = daily.iter().map(|q| q.id.as_str()).collect();
    if submitted.len() != daily.len() || submitted_ids != required_ids {
        return Err(ProgressionError::InvalidRequest(format!(
            "Must complete all {} daily strength quests",
            daily.len()
        )));
    }

    let mut next = normalize(current.clone(), today);
    if next.daily_set_completed_today {
        return Err(ProgressionError::AlreadyCompleted(
            "Daily quest already completed today".to_string(),
        ));
    }

    let mut experience: u64 = 0;
    let mut strength: u32 = 0;
    for quest in daily {
        experience = experience.saturating_add(u64::from(quest.experience_reward));
        strength = strength.saturating_add(quest.stat_reward);
    }

    next.cumulative_experience = next.cumulative_experience.saturating_add(experience);
    next.stats.add(Category::Strength, strength);
    next.streak_days = next_streak(
        next.last_completion_date,
        next.last_daily_completion_date,
        today,
        next.streak_days,
    );
    next.last_daily_completion_date = Some(today);
    next.last_completion_date = Some(today);
    next.daily_set_completed_today = true;

    let level = level_of(next.cumulative_experience);
    Ok(Completion {
        progression: next,
        level,
    })
}

/// Complete a single quest from a rotating category.
pub fn complete_individual(
    current: &UserProgression,
    submitted: &[String],
    catalog: &QuestCatalog,
    today: NaiveDate,
) -> Result<Completion, ProgressionError> {
    let quest_id = match submitted {
        [id] => id.as_str(),
        _ => {
            return Err(ProgressionError::InvalidRequest(
                "Individual quest requires exactly 1 quest".to_string(),
            ))
        }
    };

    let mut next = normalize(current.clone(), today);
    if next.completed_today.iter().any(|id| id == quest_id) {
        return Err(ProgressionError::AlreadyCompleted(format!(
            "Quest {} already completed today",
            quest_id
        )));
    }

    let quest = catalog
        .get_rotating(quest_id)
        .ok_or_else(|| ProgressionError::UnknownQuest(quest_id.to_string()))?;

    next.cumulative_experience = next
        .cumulative_experience
        .saturating_add(u64::from(quest.experience_reward));
    next.stats.add(quest.category, quest.stat_reward);
    next.completed_today.push(quest.id.clone());
    next.last_completion_date = Some(today);

    let level = level_of(next.cumulative_experience);
    Ok(Completion {
        progression: next,
        level,
    })
}

/// Quests assigned for `today` that are not yet completed, in assignment order.
///
/// Empty when the stored assignment belongs to another day.
pub fn quests_remaining(progression: &UserProgression, today: NaiveDate) -> Vec<String> {
    let normalized = normalize(progression.clone(), today);
    match &normalized.assigned_quests {
        Some(assigned) if assigned.date == today => assigned
            .quest_ids
            .iter()
            .filter(|id| !normalized.completed_today.contains(*id))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}
