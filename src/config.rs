// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development. In production the
//! signing key is injected as an environment variable by the platform.

use crate::services::password::DEFAULT_ITERATIONS;
use std::env;
use std::str::FromStr;

/// Which record store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Cloud Firestore (or its emulator)
    Firestore,
    /// Process-local store, lost on restart. Local development only.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid("STORE_BACKEND", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Record store backend
    pub store_backend: StoreBackend,
    /// Optional JSON file replacing the built-in quest catalog
    pub quest_catalog_path: Option<String>,
    /// Offset from UTC (minutes) that defines where a calendar day starts
    pub day_offset_minutes: i32,
    /// PBKDF2 iterations for new password hashes
    pub password_hash_iterations: u32,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Config for tests: in-memory store, built-in catalog, UTC days.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            store_backend: StoreBackend::Memory,
            quest_catalog_path: None,
            day_offset_minutes: 0,
            password_hash_iterations: 1_000,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => StoreBackend::Firestore,
        };

        let day_offset_minutes = match env::var("DAY_OFFSET_MINUTES") {
            Ok(v) => {
                let minutes: i32 = v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("DAY_OFFSET_MINUTES", v.clone()))?;
                // chrono::FixedOffset accepts strictly less than one day
                if minutes.abs() >= 24 * 60 {
                    return Err(ConfigError::Invalid("DAY_OFFSET_MINUTES", v));
                }
                minutes
            }
            Err(_) => 0,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            store_backend,
            quest_catalog_path: env::var("QUEST_CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            day_offset_minutes,
            password_hash_iterations: env::var("PASSWORD_HASH_ITERATIONS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .filter(|&n: &u32| n > 0)
                .unwrap_or(DEFAULT_ITERATIONS),

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
