// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account model for storage and API.

use serde::{Deserialize, Serialize};

/// User account stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque user ID (also used as document ID)
    pub id: String,
    /// Login email, stored lowercase
    pub email: String,
    /// PBKDF2 hash (see `services::password`)
    pub password_hash: String,
    /// Public display name, chosen after registration
    #[serde(default)]
    pub username: Option<String>,
    /// Lowercased `username` for case-insensitive uniqueness checks
    #[serde(default)]
    pub username_lower: Option<String>,
    /// When the account was created
    pub created_at: String,
    /// Last login timestamp
    pub last_active: String,
}

/// Fields needed to create an account. The store assigns the ID.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}
