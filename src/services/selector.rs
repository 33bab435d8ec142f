// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Random quest selection without replacement.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::QuestTemplate;

/// Pick up to `count` distinct quests uniformly at random.
///
/// The result is a uniformly random permutation prefix of `quests` with
/// length `min(count, quests.len())`. The caller owns persistence of the
/// draw.
pub fn select_random<'a, R: Rng + ?Sized>(
    quests: &'a [QuestTemplate],
    count: usize,
    rng: &mut R,
) -> Vec<&'a QuestTemplate> {
    if quests.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut pool: Vec<&QuestTemplate> = quests.iter().collect();
    let amount = count.min(pool.len());
    let (chosen, _) = pool.partial_shuffle(rng, amount);
    chosen.to_vec()
}
