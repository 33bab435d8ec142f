// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Level curve derived from cumulative experience.
//!
//! Level 1 starts at 0 XP and the first threshold is 100 XP. Each level
//! after that needs 200 XP more than the previous threshold:
//! 100, 300, 500, 700, ...

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const FIRST_THRESHOLD: u64 = 100;
const THRESHOLD_STEP: u64 = 200;

/// Level derived from cumulative experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LevelInfo {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub level: u64,
    /// Echo of the cumulative experience
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub current_xp: u64,
    /// Cumulative experience needed for the next level
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub xp_required: u64,
}

/// Compute the level for `cumulative_experience`.
///
/// Equivalent to walking the thresholds one at a time, but constant-time.
pub fn level_of(cumulative_experience: u64) -> LevelInfo {
    let thresholds_passed = if cumulative_experience < FIRST_THRESHOLD {
        0
    } else {
        (cumulative_experience - FIRST_THRESHOLD) / THRESHOLD_STEP + 1
    };

    LevelInfo {
        level: thresholds_passed + 1,
        current_xp: cumulative_experience,
        xp_required: FIRST_THRESHOLD.saturating_add(thresholds_passed.saturating_mul(THRESHOLD_STEP)),
    }
}
