//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp for the current moment that is strictly later
    /// than `previous`.
    ///
    /// Two mutations landing within the clock's resolution would otherwise
    /// share a timestamp; in that case the result is `previous` plus one
    /// millisecond.
    pub fn now_after(previous: &Timestamp) -> Self {
        let now = Self::now();
        if now.is_after(previous) {
            now
        } else {
            previous.plus_millis(1)
        }
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp by adding the specified number of milliseconds.
    pub fn plus_millis(&self, millis: i64) -> Self {
        Self(self.0 + Duration::milliseconds(millis))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Timestamp::now();
        let ts = Timestamp::now();
        let after = Timestamp::now();

        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn now_after_is_strictly_later_than_a_future_value() {
        let future = Timestamp::now().plus_millis(60_000);
        let next = Timestamp::now_after(&future);
        assert!(next.is_after(&future));
        assert_eq!(next, future.plus_millis(1));
    }

    #[test]
    fn now_after_uses_wall_clock_when_it_has_advanced() {
        let past = Timestamp::now().plus_millis(-60_000);
        let next = Timestamp::now_after(&past);
        assert!(next.is_after(&past.plus_millis(1)));
    }

    #[test]
    fn now_after_chain_is_strictly_increasing() {
        let mut previous = Timestamp::now();
        for _ in 0..100 {
            let next = Timestamp::now_after(&previous);
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn timestamp_round_trips_through_json() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.ends_with("Z\""));
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
