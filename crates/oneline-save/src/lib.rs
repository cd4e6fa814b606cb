//! Oneline Save -- durable progress with tamper evidence.
//!
//! Everything a player accumulates (coins, per-tier progress, the ad
//! purchase, the challenge cooldown, the daily reward day) lives in one
//! [`record::SaveRecord`], written through on every state change and
//! protected by a SHA-256 integrity hash over its canonical JSON form.
//! Loading never fails: corrupt files fall back to defaults, tampered
//! files fall back to defaults *and* forfeit today's daily reward.
//!
//! The record persists the tier count it was written with, so a build
//! configured with more or fewer difficulty tiers migrates the progress
//! array on load instead of discarding it.
//!
//! Wall-clock time is always injected as fractional days since the Unix
//! epoch ([`clock::days_now`] is the production source); nothing in here
//! reads the system clock on its own.

pub mod clock;
pub mod integrity;
pub mod record;
pub mod store;
pub mod timer;

pub use record::SaveRecord;
pub use store::{FileBackend, LoadOutcome, MemoryBackend, SaveError, SaveStore, StorageBackend};
pub use timer::{CHALLENGE_COOLDOWN_SECS, ChallengeTimer};
