//! Campaign progression rules: where a clear leads, when the stored
//! frontier moves, and how challenge attempts pick their level.

use crate::rng::GameRng;

/// Sentinel level number stored once the final tier has been finished.
/// The campaign does not roll over past its last tier; it parks here.
pub const FINAL_LEVEL_CAP: u32 = 100;

/// Where the campaign goes after clearing `level` in `tier`.
///
/// Within a tier the next level follows; past the end of a tier the next
/// tier opens at level 1. The final regular tier is the end of the
/// campaign: finishing it parks the level counter at [`FINAL_LEVEL_CAP`]
/// rather than advancing into the challenge tier, which is reached by its
/// own flow.
pub fn next_level(tier: u32, level: u32, levels_in_tier: u32, tier_count: u32) -> (u32, u32) {
    let level = level + 1;
    if level > levels_in_tier {
        if tier + 1 == tier_count {
            (tier, FINAL_LEVEL_CAP)
        } else {
            (tier + 1, 1)
        }
    } else {
        (tier, level)
    }
}

/// Whether clearing `level` pushes the stored frontier forward. Replaying
/// an already-cleared level does not, and the parked sentinel never does.
pub fn clears_frontier(level: u32, frontier: u32) -> bool {
    level + 1 > frontier && level <= FINAL_LEVEL_CAP
}

/// Pick the tier and level for a challenge attempt.
///
/// The tier is uniform in `[min_tier, max_tier)` (upper bound exclusive);
/// the level is uniform in `1..=count` for the drawn tier. Tiers missing
/// from `levels_per_tier` fall back to level 1.
pub fn pick_challenge(
    rng: &mut GameRng,
    min_tier: u32,
    max_tier: u32,
    levels_per_tier: &[u32],
) -> (u32, u32) {
    let tier = if max_tier > min_tier {
        min_tier + rng.next_in_range((max_tier - min_tier) as u64) as u32
    } else {
        min_tier
    };
    let count = levels_per_tier
        .get(tier as usize)
        .copied()
        .unwrap_or(1)
        .max(1);
    let level = 1 + rng.next_in_range(count as u64) as u32;
    (tier, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_within_a_tier() {
        assert_eq!(next_level(0, 1, 100, 5), (0, 2));
        assert_eq!(next_level(3, 99, 100, 5), (3, 100));
    }

    #[test]
    fn rolls_over_into_the_next_tier() {
        assert_eq!(next_level(0, 100, 100, 5), (1, 1));
        assert_eq!(next_level(2, 50, 50, 5), (3, 1));
    }

    #[test]
    fn final_tier_parks_at_the_cap() {
        assert_eq!(next_level(4, 100, 100, 5), (4, FINAL_LEVEL_CAP));
        // And stays parked on replays of the sentinel.
        assert_eq!(next_level(4, FINAL_LEVEL_CAP, 100, 5), (4, FINAL_LEVEL_CAP));
    }

    #[test]
    fn frontier_moves_only_on_frontier_clears() {
        // Clearing the frontier level itself.
        assert!(clears_frontier(7, 7));
        // Replaying an old level.
        assert!(!clears_frontier(3, 7));
        // The parked sentinel is past every frontier but never upgrades.
        assert!(!clears_frontier(101, 7));
        assert!(clears_frontier(100, 100));
    }

    #[test]
    fn challenge_pick_respects_bounds() {
        let counts = [100, 100, 80, 60, 40];
        let mut rng = GameRng::new(99);
        for _ in 0..500 {
            let (tier, level) = pick_challenge(&mut rng, 2, 4, &counts);
            assert!((2..4).contains(&tier));
            assert!((1..=counts[tier as usize]).contains(&level));
        }
    }

    #[test]
    fn challenge_pick_with_degenerate_range() {
        let mut rng = GameRng::new(1);
        let (tier, level) = pick_challenge(&mut rng, 2, 2, &[10, 10, 10]);
        assert_eq!(tier, 2);
        assert!((1..=10).contains(&level));

        // Unknown tier falls back to level 1.
        let (tier, level) = pick_challenge(&mut rng, 9, 9, &[10]);
        assert_eq!(tier, 9);
        assert_eq!(level, 1);
    }
}
