//! Wall-clock sampling.
//!
//! Timestamps are fractional days since the Unix epoch. Only differences
//! of timestamps are ever used, so the choice of epoch is unobservable;
//! what matters is that it is fixed. Nothing in this crate reads the
//! system clock on its own -- "now" is always passed in, and this module
//! is the production source of that value.

use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fractional days since the Unix epoch, right now.
pub fn days_now() -> f64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs_f64() / SECONDS_PER_DAY,
        // A clock set before 1970 reads as the epoch itself.
        Err(_) => 0.0,
    }
}

/// The whole-day number of a days-since-epoch timestamp. Daily rewards
/// compare these.
pub fn day_of(days: f64) -> i64 {
    days as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_after_2020() {
        // 2020-01-01 is day 18262.
        assert!(days_now() > 18_262.0);
    }

    #[test]
    fn day_of_truncates() {
        assert_eq!(day_of(0.0), 0);
        assert_eq!(day_of(19_999.99), 19_999);
        assert_eq!(day_of(20_000.0), 20_000);
    }
}
