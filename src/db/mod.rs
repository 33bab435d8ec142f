// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! `UserStore` is the record store seam. `FirestoreDb` backs production;
//! `MemoryDb` backs local development and tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{NewUser, User, UserProgression};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Progression documents (keyed by user ID)
    pub const PROGRESSIONS: &str = "progressions";
}

/// Record store for accounts and progression.
///
/// Every backend failure is reported as `AppError::StorageUnavailable`.
/// Writes are last-write-wins.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get a user by ID.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError>;

    /// Get a user by (lowercase) email.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Create a user. Fails with `AppError::Conflict` if the email is taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Create or replace a user.
    async fn upsert_user(&self, user: &User) -> Result<(), AppError>;

    /// Whether any user already has this username, ignoring case.
    async fn is_username_taken(&self, username: &str) -> Result<bool, AppError>;

    /// Get a user's progression.
    async fn get_progression(&self, user_id: &str) -> Result<Option<UserProgression>, AppError>;

    /// Store a user's progression.
    async fn set_progression(
        &self,
        user_id: &str,
        progression: &UserProgression,
    ) -> Result<(), AppError>;
}

/// Generate a random, URL-safe document ID.
pub fn generate_id() -> Result<String, AppError> {
    let mut bytes = [0u8; 16];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG unavailable")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Build a `User` record for a newly registered account.
pub(crate) fn user_from_new(id: String, new_user: NewUser) -> User {
    let now = crate::time_utils::now_rfc3339();
    User {
        id,
        email: new_user.email,
        password_hash: new_user.password_hash,
        username: None,
        username_lower: None,
        created_at: now.clone(),
        last_active: now,
    }
}
