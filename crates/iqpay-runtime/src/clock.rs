#![forbid(unsafe_code)]

//! Wall-clock seam.
//!
//! Session expiry and DOB year validation depend on "now"; injecting a
//! [`Clock`] keeps both deterministic under test.

use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Hand-cranked clock for tests. Shared via `Arc`; `advance` moves every
/// holder's view of now.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<SystemTime>,
}

impl ManualClock {
    #[must_use]
    pub fn starting_at(now: SystemTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock at the given epoch-milliseconds instant.
    #[must_use]
    pub fn at_millis(millis: u64) -> Self {
        Self::starting_at(UNIX_EPOCH + Duration::from_millis(millis))
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }

    pub fn set(&self, to: SystemTime) {
        if let Ok(mut now) = self.now.lock() {
            *now = to;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        self.now.lock().map(|g| *g).unwrap_or(UNIX_EPOCH)
    }
}

/// Milliseconds since the Unix epoch; pre-epoch instants clamp to zero.
#[must_use]
pub fn epoch_millis(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Calendar year of a timestamp in UTC.
///
/// Days-to-civil conversion over a proleptic Gregorian calendar, 400-year
/// eras anchored at 0000-03-01.
#[must_use]
pub fn year_utc(t: SystemTime) -> i32 {
    let secs = match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    };
    let days = secs.div_euclid(86_400);
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (if month <= 2 { y + 1 } else { y }) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::at_millis(1_000);
        assert_eq!(epoch_millis(clock.now()), 1_000);
        clock.advance(Duration::from_millis(250));
        assert_eq!(epoch_millis(clock.now()), 1_250);
        clock.set(UNIX_EPOCH);
        assert_eq!(epoch_millis(clock.now()), 0);
    }

    #[test]
    fn year_of_known_instants() {
        assert_eq!(year_utc(UNIX_EPOCH), 1970);
        // 2000-03-01T00:00:00Z
        assert_eq!(year_utc(UNIX_EPOCH + Duration::from_secs(951_868_800)), 2000);
        // 2023-11-14T22:13:20Z
        assert_eq!(
            year_utc(UNIX_EPOCH + Duration::from_secs(1_700_000_000)),
            2023
        );
        // 1999-12-31T23:59:59Z
        assert_eq!(year_utc(UNIX_EPOCH + Duration::from_secs(946_684_799)), 1999);
        // 2000-01-01T00:00:00Z
        assert_eq!(year_utc(UNIX_EPOCH + Duration::from_secs(946_684_800)), 2000);
    }

    #[test]
    fn year_before_epoch() {
        assert_eq!(year_utc(UNIX_EPOCH - Duration::from_secs(86_400)), 1969);
    }
}
