//! Emission gate: rate-limits reduced readings to one per interval.
//!
//! The gate owns the time of the last emission and reads "now" from an
//! injected [`Clock`], so tests can drive it without waiting on the wall
//! clock. Clock readings are truncated to whole seconds before they are
//! compared, and the difference must strictly exceed the interval. The very
//! first call always emits.

use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDateTime, SubsecRound};

use crate::types::{Emission, Reading};

/// Source of local wall-clock time.
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;
}

/// [`Clock`] backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Manually advanced [`Clock`]. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, to: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Stateful emission gate.
#[derive(Debug)]
pub struct EmissionGate<C> {
    clock: C,
    interval_secs: i64,
    last_emission: Option<NaiveDateTime>,
}

impl<C: Clock> EmissionGate<C> {
    pub fn new(clock: C, interval_secs: u32) -> Self {
        Self {
            clock,
            interval_secs: i64::from(interval_secs),
            last_emission: None,
        }
    }

    pub fn interval_secs(&self) -> i64 {
        self.interval_secs
    }

    pub fn last_emission(&self) -> Option<NaiveDateTime> {
        self.last_emission
    }

    /// Stamp `reading` with the current second and return it if the
    /// interval has elapsed since the last emission.
    pub fn offer(&mut self, reading: Reading) -> Option<Emission> {
        let now = self.clock.now().trunc_subsecs(0);
        if let Some(last) = self.last_emission {
            let elapsed = (now - last).num_seconds();
            if elapsed <= self.interval_secs {
                tracing::trace!(elapsed, interval = self.interval_secs, "emission suppressed");
                return None;
            }
        }
        self.last_emission = Some(now);
        Some(Emission { ts: now, reading })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t0() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap()
    }

    #[test]
    fn first_offer_always_emits() {
        let clock = ManualClock::new(t0());
        let mut gate = EmissionGate::new(clock, u32::MAX);
        let emission = gate.offer(Reading::new(1, 2)).unwrap();
        assert_eq!(emission.ts, t0());
        assert_eq!(emission.reading, Reading::new(1, 2));
        assert_eq!(gate.last_emission(), Some(t0()));
    }

    #[test]
    fn offer_within_interval_is_suppressed() {
        let clock = ManualClock::new(t0());
        let mut gate = EmissionGate::new(clock.clone(), 5);
        assert!(gate.offer(Reading::new(1, 1)).is_some());

        clock.advance(Duration::seconds(3));
        assert!(gate.offer(Reading::new(2, 2)).is_none());
        assert_eq!(gate.last_emission(), Some(t0()));
    }

    #[test]
    fn elapsed_equal_to_interval_is_suppressed() {
        // t0 sits on a whole second, so 5.999s later still reads as 5s.
        assert_eq!(t0().trunc_subsecs(0), t0());
        let clock = ManualClock::new(t0());
        let mut gate = EmissionGate::new(clock.clone(), 5);
        gate.offer(Reading::new(1, 1));

        clock.advance(Duration::milliseconds(5_999));
        assert!(gate.offer(Reading::new(2, 2)).is_none());
    }

    #[test]
    fn offer_after_interval_emits_and_resets_baseline() {
        let clock = ManualClock::new(t0());
        let mut gate = EmissionGate::new(clock.clone(), 5);
        gate.offer(Reading::new(1, 1));

        clock.advance(Duration::seconds(6));
        let emission = gate.offer(Reading::new(2, 2)).unwrap();
        assert_eq!(emission.ts, t0() + Duration::seconds(6));

        clock.advance(Duration::seconds(5));
        assert!(gate.offer(Reading::new(3, 3)).is_none());
        clock.advance(Duration::seconds(1));
        assert!(gate.offer(Reading::new(4, 4)).is_some());
    }

    #[test]
    fn subsecond_baseline_compares_whole_seconds() {
        let start = t0() + Duration::milliseconds(900);
        let clock = ManualClock::new(start);
        let mut gate = EmissionGate::new(clock.clone(), 5);
        let first = gate.offer(Reading::new(1, 1)).unwrap();
        assert_eq!(first.ts, t0());

        // 10:00:05.100 is only 4.2s later but already reads as 5s: suppressed.
        clock.set(t0() + Duration::milliseconds(5_100));
        assert!(gate.offer(Reading::new(2, 2)).is_none());

        // 10:00:06.100 is 5.2s after the first reading.
        clock.set(start + Duration::milliseconds(5_200));
        let emission = gate.offer(Reading::new(3, 3)).unwrap();
        assert_eq!(emission.ts, t0() + Duration::seconds(6));
        assert_eq!(gate.last_emission(), Some(t0() + Duration::seconds(6)));
    }

    #[test]
    fn zero_interval_needs_one_whole_second() {
        let clock = ManualClock::new(t0());
        let mut gate = EmissionGate::new(clock.clone(), 0);
        assert!(gate.offer(Reading::INVALID).is_some());
        assert!(gate.offer(Reading::INVALID).is_none());
        clock.advance(Duration::seconds(1));
        assert!(gate.offer(Reading::INVALID).is_some());
    }

    #[test]
    fn clock_moving_backwards_suppresses() {
        let clock = ManualClock::new(t0());
        let mut gate = EmissionGate::new(clock.clone(), 5);
        gate.offer(Reading::new(1, 1));
        clock.set(t0() - Duration::hours(1));
        assert!(gate.offer(Reading::new(2, 2)).is_none());
    }
}
