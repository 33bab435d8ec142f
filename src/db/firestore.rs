// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (account storage)
//! - Progressions (per-user quest progression)

use crate::db::{collections, generate_id, user_from_new, UserStore};
use crate::error::AppError;
use crate::models::{NewUser, User, UserProgression};
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id).await.map_err(|e| {
            AppError::StorageUnavailable(format!("Failed to connect to Firestore: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::StorageUnavailable(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a disconnected client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client.as_ref().ok_or_else(|| {
            AppError::StorageUnavailable("Database not connected (offline mode)".to_string())
        })
    }
}

#[async_trait]
impl UserStore for FirestoreDb {
    // ─── User Operations ─────────────────────────────────────────

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.to_string();
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.field("email").eq(email.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        // Not transactional: two concurrent registrations for the same email
        // can both pass this check.
        if self.get_user_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let user = user_from_new(generate_id()?, new_user);
        self.upsert_user(&user).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
        Ok(())
    }

    async fn is_username_taken(&self, username: &str) -> Result<bool, AppError> {
        let wanted = username.to_lowercase();
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.field("username_lower").eq(wanted.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

        Ok(!users.is_empty())
    }

    // ─── Progression Operations ──────────────────────────────────

    async fn get_progression(&self, user_id: &str) -> Result<Option<UserProgression>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROGRESSIONS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))
    }

    async fn set_progression(
        &self,
        user_id: &str,
        progression: &UserProgression,
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PROGRESSIONS)
            .document_id(user_id)
            .object(progression)
            .execute()
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
        Ok(())
    }
}
