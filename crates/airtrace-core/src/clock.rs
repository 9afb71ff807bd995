//! Wall-clock abstraction so the tracking loop can be tested deterministically.

use chrono::{Local, NaiveDateTime, Timelike};
use std::sync::Mutex;

/// Source of the current wall-clock time, at whole-second resolution.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local system time with sub-second precision dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct MockClock {
    now: NaiveDateTime,
}

impl MockClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl Clock for MockClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// Clock that moves forward by a fixed step every time it is read.
#[derive(Debug)]
pub struct AdvancingClock {
    next: Mutex<NaiveDateTime>,
    step: chrono::Duration,
}

impl AdvancingClock {
    pub fn new(start: NaiveDateTime, step_secs: i64) -> Self {
        Self {
            next: Mutex::new(start),
            step: chrono::Duration::seconds(step_secs),
        }
    }
}

impl Clock for AdvancingClock {
    fn now(&self) -> NaiveDateTime {
        let mut next = match self.next.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = *next;
        *next = now + self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_system_clock_has_second_resolution() {
        assert_eq!(SystemClock.now().nanosecond(), 0);
    }

    #[test]
    fn test_mock_clock_returns_fixed_time() {
        let clock = MockClock::new(start());
        assert_eq!(clock.now(), start());
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn test_advancing_clock_steps_on_each_read() {
        let clock = AdvancingClock::new(start(), 3);
        assert_eq!(clock.now(), start());
        assert_eq!(clock.now(), start() + chrono::Duration::seconds(3));
        assert_eq!(clock.now(), start() + chrono::Duration::seconds(6));
    }
}
