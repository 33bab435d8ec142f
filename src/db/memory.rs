// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process record store.
//!
//! Data lives only as long as the process. Used for local development
//! (`STORE_BACKEND=memory`) and tests.

use crate::db::{generate_id, user_from_new, UserStore};
use crate::error::AppError;
use crate::models::{NewUser, User, UserProgression};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// DashMap-backed store. Cloning shares the underlying maps.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<DashMap<String, User>>,
    /// email -> user ID
    emails: Arc<DashMap<String, String>>,
    progressions: Arc<DashMap<String, UserProgression>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryDb {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(user_id).map(|u| u.value().clone()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let Some(user_id) = self.emails.get(email).map(|id| id.value().clone()) else {
            return Ok(None);
        };
        self.get_user(&user_id).await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let user_id = generate_id()?;

        // Claim the email first so two registrations cannot both succeed
        match self.emails.entry(new_user.email.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::Conflict("User already exists".to_string()));
            }
            Entry::Vacant(slot) => {
                slot.insert(user_id.clone());
            }
        }

        let user = user_from_new(user_id, new_user);
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.emails.insert(user.email.clone(), user.id.clone());
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn is_username_taken(&self, username: &str) -> Result<bool, AppError> {
        let wanted = username.to_lowercase();
        Ok(self
            .users
            .iter()
            .any(|u| u.username_lower.as_deref() == Some(wanted.as_str())))
    }

    async fn get_progression(&self, user_id: &str) -> Result<Option<UserProgression>, AppError> {
        Ok(self.progressions.get(user_id).map(|p| p.value().clone()))
    }

    async fn set_progression(
        &self,
        user_id: &str,
        progression: &UserProgression,
    ) -> Result<(), AppError> {
        self.progressions
            .insert(user_id.to_string(), progression.clone());
        Ok(())
    }
}
