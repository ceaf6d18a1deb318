//! Wall-clock abstraction.
//!
//! The [`TimeSource`] trait lets the state builder read "now" without
//! depending on a particular clock. A read either succeeds with
//! [`TimeComponents`] or fails with [`ClockError::SystemTimeUnavailable`];
//! a failed read is never reported as midnight.
//!
//! [`TimeSource::now_or_midnight`] keeps the zero-on-failure contract for
//! callers that want it, and accepts that `00:00:00` is then ambiguous.

use chrono::{Local, Timelike, Utc};

use crate::error::ClockError;
use crate::state::TimeComponents;

/// A source of the current local time and epoch timestamp.
pub trait TimeSource {
    /// Read the current local time of day.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::SystemTimeUnavailable`] if the clock cannot be
    /// read.
    fn now(&self) -> Result<TimeComponents, ClockError>;

    /// Read the current time as Unix epoch seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::SystemTimeUnavailable`] if the clock cannot be
    /// read.
    fn unix_timestamp(&self) -> Result<i64, ClockError>;

    /// Read the current time, substituting `00:00:00` on failure.
    fn now_or_midnight(&self) -> TimeComponents {
        self.now().unwrap_or_default()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn now(&self) -> Result<TimeComponents, ClockError> {
        (**self).now()
    }

    fn unix_timestamp(&self) -> Result<i64, ClockError> {
        (**self).unix_timestamp()
    }
}

/// The host's local wall clock, read through [`chrono::Local`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimeSource;

impl LocalTimeSource {
    /// Create a host clock source.
    pub const fn new() -> Self {
        Self
    }
}

impl TimeSource for LocalTimeSource {
    fn now(&self) -> Result<TimeComponents, ClockError> {
        let local = Local::now();
        let field = |name: &str, value: u32| {
            u8::try_from(value).map_err(|_err| ClockError::SystemTimeUnavailable {
                reason: format!("local {name} {value} out of range"),
            })
        };
        Ok(TimeComponents {
            hours: field("hour", local.hour())?,
            minutes: field("minute", local.minute())?,
            seconds: field("second", local.second())?,
        })
    }

    fn unix_timestamp(&self) -> Result<i64, ClockError> {
        Ok(Utc::now().timestamp())
    }
}

/// A source that always reports the same time of day.
///
/// The timestamp comes from the host clock unless pinned with
/// [`FixedTimeSource::with_timestamp`].
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    time: TimeComponents,
    timestamp: Option<i64>,
}

impl FixedTimeSource {
    /// Report `time` on every read.
    pub const fn new(time: TimeComponents) -> Self {
        Self {
            time,
            timestamp: None,
        }
    }

    /// Pin the epoch timestamp reported alongside the fixed time.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Result<TimeComponents, ClockError> {
        Ok(self.time)
    }

    fn unix_timestamp(&self) -> Result<i64, ClockError> {
        Ok(self.timestamp.unwrap_or_else(|| Utc::now().timestamp()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct BrokenClock;

    impl TimeSource for BrokenClock {
        fn now(&self) -> Result<TimeComponents, ClockError> {
            Err(ClockError::SystemTimeUnavailable {
                reason: "no clock".to_owned(),
            })
        }

        fn unix_timestamp(&self) -> Result<i64, ClockError> {
            self.now().map(|_time| 0)
        }
    }

    #[test]
    fn local_clock_reads_valid_components() {
        let time = LocalTimeSource::new().now().unwrap();
        assert!(time.validate().is_ok());
        assert!(LocalTimeSource::new().unix_timestamp().unwrap() > 0);
    }

    #[test]
    fn fixed_source_repeats_time() {
        let time = TimeComponents::new(14, 30, 45).unwrap();
        let source = FixedTimeSource::new(time).with_timestamp(1_700_000_000);
        assert_eq!(source.now().unwrap(), time);
        assert_eq!(source.now().unwrap(), time);
        assert_eq!(source.unix_timestamp().unwrap(), 1_700_000_000);
    }

    #[test]
    fn unpinned_fixed_source_uses_host_timestamp() {
        let source = FixedTimeSource::new(TimeComponents::default());
        assert!(source.unix_timestamp().unwrap() > 0);
    }

    #[test]
    fn failure_is_explicit() {
        assert!(matches!(
            BrokenClock.now(),
            Err(ClockError::SystemTimeUnavailable { .. })
        ));
        assert_eq!(BrokenClock.now_or_midnight(), TimeComponents::default());
    }

    #[test]
    fn boxed_source_delegates() {
        let time = TimeComponents::new(1, 2, 3).unwrap();
        let boxed: Box<dyn TimeSource> = Box::new(FixedTimeSource::new(time));
        assert_eq!(boxed.now().unwrap(), time);
    }
}
