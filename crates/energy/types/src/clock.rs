//! Clock capability
//!
//! Ledgers never read the system time directly. They ask a [`Clock`], so
//! production code can hand in the wall clock while tests drive a
//! [`ManualClock`] forward by exact amounts.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Source of the current instant.
///
/// Implementations are expected to be monotonically non-decreasing. Ledgers
/// tolerate a backward jump by crediting no time for it.
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle while the
/// ledger owns another.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Create a clock frozen at the current wall-clock time
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Move the clock forward, saturating at the latest representable instant
    pub fn advance(&self, by: Duration) {
        let delta = TimeDelta::from_std(by).unwrap_or(TimeDelta::MAX);
        let mut now = self.now.lock();
        *now = now.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC);
    }

    /// Jump to an arbitrary instant, backwards included
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_now()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(start());
        clock.advance(Duration::from_secs(90 * 60));

        assert_eq!(clock.now(), start() + TimeDelta::minutes(90));
    }

    #[test]
    fn test_clones_share_instant() {
        let clock = ManualClock::new(start());
        let handle = clock.clone();

        handle.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), start() + TimeDelta::seconds(1));

        handle.set(start());
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn test_advance_saturates() {
        let clock = ManualClock::new(start());
        clock.advance(Duration::MAX);

        assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();

        assert!(second >= first);
    }
}
