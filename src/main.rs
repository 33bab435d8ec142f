// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest Leveling API Server
//!
//! Serves quest assignment, completion and progression for the habit
//! tracker frontend.

use quest_leveling::{
    config::{Config, StoreBackend},
    db::{FirestoreDb, MemoryDb, UserStore},
    services::{QuestCatalog, QuestService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        day_offset_minutes = config.day_offset_minutes,
        "Starting Quest Leveling API"
    );

    // Record store
    let store: Arc<dyn UserStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; all data is lost on restart");
            Arc::new(MemoryDb::new())
        }
    };

    // Quest catalog
    let catalog = match &config.quest_catalog_path {
        Some(path) => {
            tracing::info!(path = %path, "Loading quest catalog");
            QuestCatalog::load_from_file(path)?
        }
        None => QuestCatalog::builtin()?,
    };
    let quest_service = QuestService::new(catalog);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        quest_service,
    });

    // Build router
    let app = quest_leveling::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quest_leveling=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
