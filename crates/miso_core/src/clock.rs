//! Wall-clock abstraction for timestamped records.
//!
//! Services stamp `created_at`/`updated_at`/`saved_at` through this trait so
//! tests can pin time and calendar-based rules (streaks, default board names)
//! stay deterministic.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;

    /// Current UTC calendar date.
    fn today(&self) -> NaiveDate {
        date_from_epoch_ms(self.now_ms())
    }
}

/// Clock backed by the operating system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

/// Converts epoch milliseconds into a UTC calendar date.
///
/// Out-of-range timestamps map to the Unix epoch date.
pub fn date_from_epoch_ms(epoch_ms: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|instant| instant.date_naive())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{date_from_epoch_ms, Clock, FixedClock};
    use chrono::NaiveDate;

    #[test]
    fn epoch_ms_maps_to_utc_date() {
        // 2024-03-01T23:59:59.999Z
        let date = date_from_epoch_ms(1_709_337_599_999);
        assert_eq!(
            date,
            NaiveDate::from_ymd_opt(2024, 3, 1).expect("March 1 should be a valid date")
        );
    }

    #[test]
    fn fixed_clock_reports_pinned_day() {
        let clock = FixedClock(1_709_337_600_000);
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2024, 3, 2).expect("March 2 should be a valid date")
        );
    }
}
