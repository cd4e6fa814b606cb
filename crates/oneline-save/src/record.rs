//! The durable progress record.

use serde::{Deserialize, Serialize};

/// The persisted progress record.
///
/// Field declaration order is the wire order, and the integrity hash is
/// computed over exactly this serialized shape with `integrity_hash`
/// blanked. Reordering, renaming or retyping a field is a format break
/// that invalidates every existing save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// Coin balance.
    pub coins: i64,

    /// Highest-unlocked-level frontier per tier, plus one trailing slot
    /// counting challenge wins. Length is always `tier_count + 1`.
    pub tier_progress: Vec<u32>,

    /// Number of regular tiers the record was written with. Persisted so
    /// that a build configured differently can resize `tier_progress` on
    /// load instead of discarding it.
    pub tier_count: u32,

    /// Whether the remove-ads purchase has been made.
    pub ads_disabled: bool,

    /// Challenge cooldown remaining, in seconds.
    pub challenge_seconds_remaining: f64,

    /// When the record was last written: fractional days since the Unix
    /// epoch. Lets the cooldown keep counting while the process is closed.
    pub last_save_timestamp: f64,

    /// Whole day number on which the daily reward was last claimed.
    pub last_daily_reward_day: i64,

    /// Lowercase-hex SHA-256 over the record with this field blanked.
    pub integrity_hash: String,
}

impl SaveRecord {
    /// A fresh record for `tier_count` tiers: every tier open at level 1,
    /// zero challenge wins, nothing else accumulated.
    pub fn fresh(tier_count: u32) -> Self {
        let mut tier_progress = vec![1u32; tier_count as usize + 1];
        if let Some(challenge) = tier_progress.last_mut() {
            *challenge = 0;
        }
        Self {
            coins: 0,
            tier_progress,
            tier_count,
            ads_disabled: false,
            challenge_seconds_remaining: 0.0,
            last_save_timestamp: 0.0,
            last_daily_reward_day: 0,
            integrity_hash: String::new(),
        }
    }

    /// Index of the trailing challenge-wins slot.
    pub fn challenge_slot(&self) -> usize {
        self.tier_count as usize
    }
}
