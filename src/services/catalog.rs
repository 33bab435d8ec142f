// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest catalog loading and lookup service.

use crate::models::{Category, QuestTemplate};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Number of quests in the fixed daily strength set.
pub const DAILY_SET_SIZE: usize = 4;

/// Quests drawn per rotating category each day.
pub const QUESTS_PER_CATEGORY: usize = 2;

const BUILTIN_CATALOG: &str = include_str!("../../data/quests.json");

#[derive(Deserialize)]
struct CatalogFile {
    quests: Vec<QuestTemplate>,
}

/// Immutable quest catalog with an ID index built once at startup.
#[derive(Debug, Clone)]
pub struct QuestCatalog {
    quests: Vec<QuestTemplate>,
    by_id: HashMap<String, usize>,
    by_category: HashMap<Category, Vec<QuestTemplate>>,
}

impl QuestCatalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::load_from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load a catalog from a JSON string of the form `{"quests": [...]}`.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json_data).map_err(|e| CatalogError::ParseError(e.to_string()))?;
        let catalog = Self::from_quests(file.quests)?;

        tracing::info!(
            count = catalog.quests.len(),
            daily = catalog.daily_set().len(),
            "Loaded quest catalog"
        );
        Ok(catalog)
    }

    /// Build and validate a catalog from templates.
    ///
    /// IDs and names must be unique across the whole catalog, and there
    /// must be exactly `DAILY_SET_SIZE` strength quests.
    pub fn from_quests(quests: Vec<QuestTemplate>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(quests.len());
        let mut names = HashSet::with_capacity(quests.len());
        let mut by_category: HashMap<Category, Vec<QuestTemplate>> = HashMap::new();

        for (idx, quest) in quests.iter().enumerate() {
            if quest.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(quest.name.clone()));
            }
            if by_id.insert(quest.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(quest.id.clone()));
            }
            if !names.insert(quest.name.as_str()) {
                return Err(CatalogError::DuplicateName(quest.name.clone()));
            }
            by_category
                .entry(quest.category)
                .or_default()
                .push(quest.clone());
        }

        let daily_count = by_category
            .get(&Category::Strength)
            .map_or(0, |q| q.len());
        if daily_count != DAILY_SET_SIZE {
            return Err(CatalogError::DailySetSize(daily_count));
        }

        for category in Category::ROTATING {
            let available = by_category.get(&category).map_or(0, |q| q.len());
            if available < QUESTS_PER_CATEGORY {
                tracing::warn!(
                    %category,
                    available,
                    "Category has fewer quests than are drawn per day"
                );
            }
        }

        Ok(Self {
            quests,
            by_id,
            by_category,
        })
    }

    /// Every quest, in catalog order.
    pub fn quests(&self) -> &[QuestTemplate] {
        &self.quests
    }

    /// The fixed daily strength set.
    pub fn daily_set(&self) -> &[QuestTemplate] {
        self.in_category(Category::Strength)
    }

    /// Quests belonging to `category`, in catalog order.
    pub fn in_category(&self, category: Category) -> &[QuestTemplate] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up any quest by ID.
    pub fn get(&self, id: &str) -> Option<&QuestTemplate> {
        self.by_id.get(id).map(|&idx| &self.quests[idx])
    }

    /// Look up a quest from one of the rotating categories.
    pub fn get_rotating(&self, id: &str) -> Option<&QuestTemplate> {
        self.get(id).filter(|q| q.category.is_rotating())
    }
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse catalog JSON: {0}")]
    ParseError(String),

    #[error("Quest '{0}' has an empty id")]
    EmptyId(String),

    #[error("Duplicate quest id: {0}")]
    DuplicateId(String),

    #[error("Duplicate quest name: {0}")]
    DuplicateName(String),

    #[error("Daily strength set must have {expected} quests, found {0}", expected = DAILY_SET_SIZE)]
    DailySetSize(usize),
}
