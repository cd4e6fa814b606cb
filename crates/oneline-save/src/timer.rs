//! The challenge cooldown: a countdown that keeps running while the
//! process is closed.
//!
//! The persisted state is just a remaining-seconds value plus the record's
//! last-save timestamp; on resume the whole absence is subtracted in one
//! step. Availability is a one-way latch: crossing zero flips it on, and
//! only consuming it (entering a challenge) flips it back off.

/// Fixed cooldown between challenge attempts, in seconds.
pub const CHALLENGE_COOLDOWN_SECS: f64 = 1800.0;

/// Live view of the challenge cooldown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChallengeTimer {
    seconds_remaining: f64,
    available: bool,
}

impl ChallengeTimer {
    /// Rebuild the timer from a persisted remaining value. Availability is
    /// derived once here: a drained countdown is available, a running one
    /// is not.
    pub fn from_remaining(seconds: f64) -> Self {
        let seconds = seconds.max(0.0);
        Self {
            seconds_remaining: seconds,
            available: seconds <= 0.0,
        }
    }

    /// Seconds left until the challenge unlocks. Never negative.
    pub fn seconds_remaining(&self) -> f64 {
        self.seconds_remaining
    }

    /// Whether a challenge can be entered right now.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Count down by one frame's `dt`.
    pub fn tick(&mut self, dt: f64) {
        self.advance(dt);
    }

    /// Subtract a whole absence -- the wall-clock seconds elapsed since
    /// the state was last persisted -- in one step.
    pub fn apply_elapsed(&mut self, secs: f64) {
        self.advance(secs);
    }

    /// Spend the availability: the cooldown restarts at
    /// [`CHALLENGE_COOLDOWN_SECS`] and the latch flips off.
    pub fn consume(&mut self) {
        self.seconds_remaining = CHALLENGE_COOLDOWN_SECS;
        self.available = false;
    }

    fn advance(&mut self, secs: f64) {
        self.seconds_remaining = (self.seconds_remaining - secs).max(0.0);
        if self.seconds_remaining <= 0.0 {
            self.available = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_timer_is_not_available() {
        let timer = ChallengeTimer::from_remaining(100.0);
        assert!(!timer.is_available());
        assert_eq!(timer.seconds_remaining(), 100.0);
    }

    #[test]
    fn drained_timer_is_available() {
        assert!(ChallengeTimer::from_remaining(0.0).is_available());
        // Persisted negatives clamp on the way in.
        let timer = ChallengeTimer::from_remaining(-5.0);
        assert!(timer.is_available());
        assert_eq!(timer.seconds_remaining(), 0.0);
    }

    #[test]
    fn crossing_zero_latches_availability() {
        let mut timer = ChallengeTimer::from_remaining(10.0);
        timer.apply_elapsed(15.0);
        assert_eq!(timer.seconds_remaining(), 0.0);
        assert!(timer.is_available());

        // Further ticks never un-latch it.
        timer.tick(1.0);
        assert!(timer.is_available());
    }

    #[test]
    fn ticking_counts_down_without_going_negative() {
        let mut timer = ChallengeTimer::from_remaining(1.0);
        for _ in 0..30 {
            timer.tick(1.0 / 60.0);
        }
        assert!(!timer.is_available());
        assert!(timer.seconds_remaining() > 0.0);

        for _ in 0..1000 {
            timer.tick(1.0 / 60.0);
        }
        assert_eq!(timer.seconds_remaining(), 0.0);
        assert!(timer.is_available());
    }

    #[test]
    fn consume_restarts_the_cooldown() {
        let mut timer = ChallengeTimer::from_remaining(0.0);
        assert!(timer.is_available());

        timer.consume();
        assert!(!timer.is_available());
        assert_eq!(timer.seconds_remaining(), CHALLENGE_COOLDOWN_SECS);
    }
}
