// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to be set. They are skipped otherwise.

use chrono::NaiveDate;
use quest_leveling::db::UserStore;
use quest_leveling::error::AppError;
use quest_leveling::models::{AssignedQuests, Category, NewUser, UserProgression};

mod common;
use common::test_db;

/// Unique suffix for test isolation.
fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
        .to_string()
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "pbkdf2-sha256$1000$c2FsdA$aGFzaA".to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_create_and_fetch_user() {
    require_emulator!();

    let db = test_db().await;
    let email = format!("user-{}@example.com", unique_suffix());

    let created = db.create_user(new_user(&email)).await.unwrap();

    let by_id = db.get_user(&created.id).await.unwrap().expect("user by id");
    assert_eq!(by_id.email, email);
    assert!(by_id.username.is_none());

    let by_email = db
        .get_user_by_email(&email)
        .await
        .unwrap()
        .expect("user by email");
    assert_eq!(by_email.id, created.id);

    println!("✓ User created and fetched: id={}", created.id);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    require_emulator!();

    let db = test_db().await;
    let email = format!("dup-{}@example.com", unique_suffix());

    db.create_user(new_user(&email)).await.unwrap();
    let err = db.create_user(new_user(&email)).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_username_lookup_ignores_case() {
    require_emulator!();

    let db = test_db().await;
    let suffix = unique_suffix();
    let username = format!("U{}", &suffix[suffix.len() - 8..]);

    let mut user = db
        .create_user(new_user(&format!("name-{}@example.com", suffix)))
        .await
        .unwrap();
    user.username = Some(username.clone());
    user.username_lower = Some(username.to_lowercase());
    db.upsert_user(&user).await.unwrap();

    assert!(db.is_username_taken(&username.to_uppercase()).await.unwrap());
    assert!(!db.is_username_taken("nobody_here").await.unwrap());
}

// ═══════════════════════════════════════════════════════════════════════════
// PROGRESSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_progression_roundtrip() {
    require_emulator!();

    let db = test_db().await;
    let user_id = format!("prog-{}", unique_suffix());
    let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    assert!(db.get_progression(&user_id).await.unwrap().is_none());

    let mut progression = UserProgression {
        cumulative_experience: 420,
        streak_days: 3,
        last_daily_completion_date: Some(day),
        last_completion_date: Some(day),
        completed_today: vec!["agility-jump-rope".to_string()],
        daily_set_completed_today: true,
        assigned_quests: Some(AssignedQuests {
            date: day,
            quest_ids: vec!["agility-jump-rope".to_string(), "sense-meditate".to_string()],
        }),
        updated_at: "2025-03-10T12:00:00Z".to_string(),
        ..UserProgression::default()
    };
    progression.stats.add(Category::Agility, 2);
    db.set_progression(&user_id, &progression).await.unwrap();

    let fetched = db.get_progression(&user_id).await.unwrap().unwrap();
    assert_eq!(fetched, progression);

    println!("✓ Progression stored and fetched: user_id={}", user_id);
}
