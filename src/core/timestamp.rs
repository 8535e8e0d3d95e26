//! Timestamp generation
//!
//! Records carry an ISO 8601 UTC timestamp with millisecond precision
//! (`2025-01-08T10:30:45.123Z`). The clock is a trait so record construction
//! can be pinned to a fixed instant.

use chrono::{DateTime, Utc};
use std::fmt;

/// Format a `DateTime<Utc>` as ISO 8601 with milliseconds
///
/// # Examples
///
/// ```
/// use logbro::core::timestamp::iso8601;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.timestamp_millis_opt(1578068225388).single().unwrap();
/// assert_eq!(iso8601(&at), "2020-01-03T16:17:05.388Z");
/// ```
#[must_use]
pub fn iso8601(datetime: &DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Source of the current time for record construction.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Frozen at the given number of milliseconds since the Unix epoch.
    ///
    /// Out-of-range values clamp to the epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self(DateTime::from_timestamp_millis(millis).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_truncates_to_millis() {
        assert_eq!(iso8601(&fixed_datetime()), "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_iso8601_pads_zero_millis() {
        let at = Utc.with_ymd_and_hms(2020, 1, 3, 16, 17, 5).single().unwrap();
        assert_eq!(iso8601(&at), "2020-01-03T16:17:05.000Z");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::from_millis(1578068225388);
        assert_eq!(iso8601(&clock.now()), "2020-01-03T16:17:05.388Z");
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_is_iso8601() {
        let stamp = iso8601(&SystemClock.now());
        assert_eq!(stamp.len(), 24);
        assert!(stamp.ends_with('Z'));
        assert_eq!(&stamp[10..11], "T");
    }
}
