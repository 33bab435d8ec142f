// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest assignment and completion service.
//!
//! Ties the pure progression engine to the record store. Every operation
//! reads the progression fresh, computes a new value and writes it once.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::{AssignedQuests, Category, QuestTemplate, Stats, UserProgression};
use crate::services::catalog::{QuestCatalog, QUESTS_PER_CATEGORY};
use crate::services::leveling::LevelInfo;
use crate::services::progression::{self, Completion, CompletionRequest};
use crate::services::selector::select_random;
use crate::time_utils::now_rfc3339;

/// Rotating quests assigned for a day.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyAssignment {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub assigned_quests: Vec<QuestTemplate>,
}

/// Outcome of completing the daily strength set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyCompletion {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub level: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub current_xp: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub xp_required: u64,
    pub stats: Stats,
    pub streak_days: u32,
}

/// Outcome of completing one rotating quest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct IndividualCompletion {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub level: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub current_xp: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub xp_required: u64,
    pub stats: Stats,
    pub quests_completed_today: Vec<String>,
}

/// Either completion outcome, tagged like the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionOutcome {
    Daily(DailyCompletion),
    Individual(IndividualCompletion),
}

/// Quest operations over an injected store.
#[derive(Clone)]
pub struct QuestService {
    catalog: Arc<QuestCatalog>,
}

impl QuestService {
    pub fn new(catalog: QuestCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &QuestCatalog {
        &self.catalog
    }

    /// Return today's rotating quests, drawing and persisting them if needed.
    ///
    /// Repeated calls on the same day return the same quests in the same
    /// order. A stored assignment whose IDs no longer resolve is redrawn.
    pub async fn assign_daily<R: Rng + Send + ?Sized>(
        &self,
        store: &dyn UserStore,
        user_id: &str,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<DailyAssignment> {
        let mut current = store.get_progression(user_id).await?.unwrap_or_default();

        if let Some(assigned) = current.assigned_quests.as_ref().filter(|a| a.date == today) {
            if let Some(quests) = self.resolve(&assigned.quest_ids) {
                tracing::debug!(user_id, %today, "Returning existing assignment");
                return Ok(DailyAssignment {
                    date: today,
                    assigned_quests: quests,
                });
            }
            tracing::warn!(
                user_id,
                %today,
                "Stored assignment references unknown quests, redrawing"
            );
        }

        let drawn = self.draw(rng);
        current.assigned_quests = Some(AssignedQuests {
            date: today,
            quest_ids: drawn.iter().map(|q| q.id.clone()).collect(),
        });
        current.updated_at = now_rfc3339();
        store.set_progression(user_id, &current).await?;

        tracing::info!(user_id, %today, count = drawn.len(), "Assigned daily quests");
        Ok(DailyAssignment {
            date: today,
            assigned_quests: drawn,
        })
    }

    /// Complete the fixed daily strength set.
    pub async fn complete_daily(
        &self,
        store: &dyn UserStore,
        user_id: &str,
        completed_quests: Vec<String>,
        today: NaiveDate,
    ) -> Result<DailyCompletion> {
        let completion = self
            .apply_and_store(
                store,
                user_id,
                &CompletionRequest::Daily { completed_quests },
                today,
            )
            .await?;

        let p = completion.progression;
        tracing::info!(
            user_id,
            streak_days = p.streak_days,
            level = completion.level.level,
            "Daily set completed"
        );
        Ok(DailyCompletion {
            level: completion.level.level,
            current_xp: completion.level.current_xp,
            xp_required: completion.level.xp_required,
            stats: p.stats,
            streak_days: p.streak_days,
        })
    }

    /// Complete a single rotating quest.
    pub async fn complete_individual(
        &self,
        store: &dyn UserStore,
        user_id: &str,
        quest_id: &str,
        today: NaiveDate,
    ) -> Result<IndividualCompletion> {
        self.complete_individual_batch(store, user_id, vec![quest_id.to_string()], today)
            .await
    }

    /// Dispatch a tagged completion request.
    pub async fn apply_completion(
        &self,
        store: &dyn UserStore,
        user_id: &str,
        request: CompletionRequest,
        today: NaiveDate,
    ) -> Result<CompletionOutcome> {
        match request {
            CompletionRequest::Daily { completed_quests } => self
                .complete_daily(store, user_id, completed_quests, today)
                .await
                .map(CompletionOutcome::Daily),
            CompletionRequest::Individual { completed_quests } => self
                .complete_individual_batch(store, user_id, completed_quests, today)
                .await
                .map(CompletionOutcome::Individual),
        }
    }

    /// Progression as of `today`, with the daily reset applied. Never writes.
    pub async fn progression_snapshot(
        &self,
        store: &dyn UserStore,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<UserProgression> {
        let stored = store
            .get_progression(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Progression for user {}", user_id)))?;
        Ok(progression::normalize(stored, today))
    }

    /// Ensure a progression exists and persist the daily reset.
    ///
    /// Returns the progression and whether it was newly created.
    pub async fn initialize(
        &self,
        store: &dyn UserStore,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<(UserProgression, bool)> {
        match store.get_progression(user_id).await? {
            None => {
                let fresh = UserProgression {
                    updated_at: now_rfc3339(),
                    ..UserProgression::default()
                };
                store.set_progression(user_id, &fresh).await?;
                tracing::info!(user_id, "Initialized progression");
                Ok((fresh, true))
            }
            Some(stored) => {
                let mut normalized = progression::normalize(stored.clone(), today);
                if normalized != stored {
                    normalized.updated_at = now_rfc3339();
                    store.set_progression(user_id, &normalized).await?;
                    tracing::debug!(user_id, %today, "Persisted daily reset");
                }
                Ok((normalized, false))
            }
        }
    }

    async fn complete_individual_batch(
        &self,
        store: &dyn UserStore,
        user_id: &str,
        completed_quests: Vec<String>,
        today: NaiveDate,
    ) -> Result<IndividualCompletion> {
        let completion = self
            .apply_and_store(
                store,
                user_id,
                &CompletionRequest::Individual { completed_quests },
                today,
            )
            .await?;

        let p = completion.progression;
        tracing::info!(
            user_id,
            completed = p.completed_today.len(),
            level = completion.level.level,
            "Individual quest completed"
        );
        Ok(IndividualCompletion {
            level: completion.level.level,
            current_xp: completion.level.current_xp,
            xp_required: completion.level.xp_required,
            stats: p.stats,
            quests_completed_today: p.completed_today,
        })
    }

    async fn apply_and_store(
        &self,
        store: &dyn UserStore,
        user_id: &str,
        request: &CompletionRequest,
        today: NaiveDate,
    ) -> Result<Completion> {
        let current = store.get_progression(user_id).await?.unwrap_or_default();

        let mut completion =
            progression::apply(&current, request, &self.catalog, today).map_err(|e| {
                tracing::debug!(user_id, error = %e, "Completion rejected");
                AppError::from(e)
            })?;

        completion.progression.updated_at = now_rfc3339();
        store.set_progression(user_id, &completion.progression).await?;
        Ok(completion)
    }

    /// Level info for an arbitrary progression.
    pub fn level(&self, progression: &UserProgression) -> LevelInfo {
        crate::services::leveling::level_of(progression.cumulative_experience)
    }

    fn resolve(&self, ids: &[String]) -> Option<Vec<QuestTemplate>> {
        ids.iter()
            .map(|id| self.catalog.get_rotating(id).cloned())
            .collect()
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<QuestTemplate> {
        Category::ROTATING
            .iter()
            .flat_map(|&category| {
                select_random(self.catalog.in_category(category), QUESTS_PER_CATEGORY, &mut *rng)
            })
            .cloned()
            .collect()
    }
}
