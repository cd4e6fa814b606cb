//! Durable persistence with tamper evidence and tier-count migration.
//!
//! Every mutator writes through before returning; there is no dirty-flag
//! batching, so the record on disk is never behind the record in memory
//! by more than the call in flight. Loading never fails to the caller:
//! unreadable or inauthentic data lands on a fresh default record and the
//! outcome says which way it went.

use std::io;
use std::path::PathBuf;

use crate::clock;
use crate::integrity;
use crate::record::SaveRecord;

// ---------------------------------------------------------------------------
// Storage backends
// ---------------------------------------------------------------------------

/// Where the serialized record lives.
pub trait StorageBackend {
    /// Read the whole stored record.
    fn read(&self) -> io::Result<Vec<u8>>;

    /// Replace the stored record with `bytes`, whole. No partial-write
    /// recovery is attempted; a failed write is fatal for the caller.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// A single file, overwritten whole on every save.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        std::fs::write(&self.path, bytes)
    }
}

/// In-memory backend for tests. Starts empty, as if the save file does
/// not exist yet.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    pub bytes: Option<Vec<u8>>,
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> io::Result<Vec<u8>> {
        self.bytes
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no record stored"))
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

/// Errors surfaced by [`SaveStore::save`] and the write-through mutators.
/// Loading never raises these.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("could not write save record: {0}")]
    Io(#[from] io::Error),

    #[error("could not encode save record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// How a [`SaveStore::load`] resolved. Every variant leaves the store
/// holding a valid, usable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored record was authentic and matched the configured tiers.
    Loaded,

    /// Authentic, but written with a different tier count; the progress
    /// array was resized.
    Migrated { from: u32, to: u32 },

    /// Missing, unreadable or undecodable. Defaults; the daily reward
    /// stays claimable.
    ResetCorrupt,

    /// The integrity hash did not match the stored content. Defaults, and
    /// today's daily reward is forfeited.
    ResetTampered,
}

// ---------------------------------------------------------------------------
// The store
// ---------------------------------------------------------------------------

/// Owner of the durable progress record.
///
/// Exactly one store exists per profile and it is the record's only
/// mutator context; everything else reads and writes through it.
#[derive(Debug)]
pub struct SaveStore<B> {
    backend: B,
    tier_count: u32,
    record: SaveRecord,
    last_coins_earned: i64,
}

impl<B: StorageBackend> SaveStore<B> {
    /// A store configured for `tier_count` regular tiers, holding a fresh
    /// record until [`load`](Self::load) replaces it.
    pub fn new(backend: B, tier_count: u32) -> Self {
        Self {
            backend,
            tier_count,
            record: SaveRecord::fresh(tier_count),
            last_coins_earned: 0,
        }
    }

    /// Read, authenticate and migrate the stored record.
    ///
    /// The hash is checked over the record exactly as persisted; only an
    /// authenticated record is migrated. `now_days` is used to stamp the
    /// daily-reward forfeit on tampered loads.
    pub fn load(&mut self, now_days: f64) -> LoadOutcome {
        let bytes = match self.backend.read() {
            Ok(bytes) => bytes,
            Err(_) => {
                self.reset(false, now_days);
                return LoadOutcome::ResetCorrupt;
            }
        };
        let stored: SaveRecord = match serde_json::from_slice(&bytes) {
            Ok(record) => record,
            Err(_) => {
                self.reset(false, now_days);
                return LoadOutcome::ResetCorrupt;
            }
        };

        match integrity::compute_hash(&stored) {
            Ok(expected) if expected == stored.integrity_hash => {}
            _ => {
                self.reset(true, now_days);
                return LoadOutcome::ResetTampered;
            }
        }

        let from = stored.tier_count;
        self.record = stored;
        if from != self.tier_count {
            self.migrate_tiers(from);
            self.record.tier_count = self.tier_count;
            return LoadOutcome::Migrated {
                from,
                to: self.tier_count,
            };
        }
        LoadOutcome::Loaded
    }

    /// Write the record through the backend with a freshly computed hash.
    pub fn save(&mut self) -> Result<(), SaveError> {
        self.record.integrity_hash = integrity::compute_hash(&self.record)?;
        let bytes = serde_json::to_vec(&self.record)?;
        self.backend.write(&bytes)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Coins
    // -----------------------------------------------------------------------

    /// Current coin balance.
    pub fn coins(&self) -> i64 {
        self.record.coins
    }

    /// Add `delta` coins (negative spends). Remembered for
    /// [`duplicate_reward`](Self::duplicate_reward).
    pub fn add_coins(&mut self, delta: i64) -> Result<(), SaveError> {
        self.record.coins += delta;
        self.last_coins_earned = delta;
        self.save()
    }

    /// Overwrite the balance.
    pub fn set_coins(&mut self, coins: i64) -> Result<(), SaveError> {
        self.record.coins = coins;
        self.save()
    }

    /// Credit the most recent `add_coins` amount again (the ad-supported
    /// "double your reward" button).
    pub fn duplicate_reward(&mut self) -> Result<(), SaveError> {
        self.add_coins(self.last_coins_earned)
    }

    // -----------------------------------------------------------------------
    // Tier progress
    // -----------------------------------------------------------------------

    /// Configured regular tier count.
    pub fn tier_count(&self) -> u32 {
        self.tier_count
    }

    /// The stored frontier for `tier`. Index `tier_count` is the challenge
    /// slot.
    pub fn tier_progress(&self, tier: u32) -> Option<u32> {
        self.record.tier_progress.get(tier as usize).copied()
    }

    /// Number of challenge wins.
    pub fn challenge_clears(&self) -> u32 {
        self.record
            .tier_progress
            .get(self.record.challenge_slot())
            .copied()
            .unwrap_or(0)
    }

    /// Push `tier`'s frontier forward by one. Passing `tier_count` bumps
    /// the challenge-win counter.
    pub fn upgrade_tier_progress(&mut self, tier: u32) -> Result<(), SaveError> {
        if let Some(slot) = self.record.tier_progress.get_mut(tier as usize) {
            *slot += 1;
        }
        self.save()
    }

    // -----------------------------------------------------------------------
    // Ads
    // -----------------------------------------------------------------------

    /// Whether the remove-ads purchase has been made.
    pub fn ads_disabled(&self) -> bool {
        self.record.ads_disabled
    }

    /// Re-enable ads.
    pub fn enable_ads(&mut self) -> Result<(), SaveError> {
        self.record.ads_disabled = false;
        self.save()
    }

    /// Disable ads (the purchase).
    pub fn disable_ads(&mut self) -> Result<(), SaveError> {
        self.record.ads_disabled = true;
        self.save()
    }

    // -----------------------------------------------------------------------
    // Daily reward
    // -----------------------------------------------------------------------

    /// Day number the reward was last claimed.
    pub fn last_daily_reward_day(&self) -> i64 {
        self.record.last_daily_reward_day
    }

    /// Record a claim day.
    pub fn set_last_daily_reward(&mut self, day: i64) -> Result<(), SaveError> {
        self.record.last_daily_reward_day = day;
        self.save()
    }

    /// Whether today's reward is still unclaimed.
    pub fn daily_reward_available(&self, now_days: f64) -> bool {
        self.record.last_daily_reward_day < clock::day_of(now_days)
    }

    /// Claim today's reward: credit `amount` and stamp today. Returns
    /// `false` without changing anything when already claimed.
    pub fn claim_daily_reward(&mut self, amount: i64, now_days: f64) -> Result<bool, SaveError> {
        if !self.daily_reward_available(now_days) {
            return Ok(false);
        }
        self.add_coins(amount)?;
        self.set_last_daily_reward(clock::day_of(now_days))?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Challenge cooldown plumbing
    // -----------------------------------------------------------------------

    /// Remaining challenge cooldown, in seconds.
    pub fn challenge_seconds(&self) -> f64 {
        self.record.challenge_seconds_remaining
    }

    /// Add `delta` seconds (negative counts down), flooring at zero.
    ///
    /// No write happens here: every countdown step is followed by a
    /// [`save_date`](Self::save_date), which persists both fields at once.
    pub fn add_to_challenge_time(&mut self, delta: f64) {
        let t = self.record.challenge_seconds_remaining + delta;
        self.record.challenge_seconds_remaining = t.max(0.0);
    }

    /// Overwrite the remaining cooldown. Persisted by the next
    /// [`save_date`](Self::save_date), like
    /// [`add_to_challenge_time`](Self::add_to_challenge_time).
    pub fn set_challenge_time(&mut self, secs: f64) {
        self.record.challenge_seconds_remaining = secs.max(0.0);
    }

    /// Stamp of the last write, in fractional days since the epoch.
    pub fn last_save_timestamp(&self) -> f64 {
        self.record.last_save_timestamp
    }

    /// Record the current wall clock and write through.
    pub fn save_date(&mut self, now_days: f64) -> Result<(), SaveError> {
        self.record.last_save_timestamp = now_days;
        self.save()
    }

    /// Subtract the whole absence since the last `save_date` from the
    /// cooldown in one step, flooring at zero. Returns the elapsed
    /// seconds that were applied.
    pub fn apply_elapsed(&mut self, now_days: f64) -> f64 {
        let elapsed = (now_days - self.record.last_save_timestamp) * clock::SECONDS_PER_DAY;
        self.add_to_challenge_time(-elapsed);
        elapsed
    }

    // -----------------------------------------------------------------------
    // Access
    // -----------------------------------------------------------------------

    /// The live record.
    pub fn record(&self) -> &SaveRecord {
        &self.record
    }

    /// The backend, for inspection.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutable. Tests use this to corrupt stored bytes.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn reset(&mut self, cheated: bool, now_days: f64) {
        self.record = SaveRecord::fresh(self.tier_count);
        self.last_coins_earned = 0;
        if cheated {
            // A tampering player also loses today's reward.
            self.record.last_daily_reward_day = clock::day_of(now_days);
        }
    }

    fn migrate_tiers(&mut self, from: u32) {
        let old = std::mem::take(&mut self.record.tier_progress);
        let n = self.tier_count as usize;

        let mut resized = Vec::with_capacity(n + 1);
        for i in 0..n {
            resized.push(if i < from as usize {
                old.get(i).copied().unwrap_or(1)
            } else {
                // Newly added tiers open at their first level.
                1
            });
        }
        // The trailing challenge slot survives the resize wherever the old
        // array kept it.
        resized.push(old.last().copied().unwrap_or(0));
        self.record.tier_progress = resized;
    }
}
