//! Clock state snapshots.
//!
//! A [`ClockState`] is an immutable snapshot of one time of day in
//! binary-coded-decimal form: hours, minutes, and seconds are each split
//! into a tens digit (3 bits) and a units digit (4 bits), and each digit is
//! encoded as a [`BinaryDigit`]. The snapshot also carries the epoch
//! timestamp at which it was built.
//!
//! # Failure sentinel
//!
//! [`ClockState::FAILED`] has `timestamp == 0` and every digit set to
//! [`BinaryDigit::INVALID`]. The sentinel-returning builder methods
//! ([`ClockStateBuilder::from_time`], [`ClockStateBuilder::current_state`])
//! return it on any failure; the `try_` methods return the underlying
//! [`ClockError`] instead. A host clock that genuinely reads epoch zero is
//! indistinguishable from failure on the sentinel surface.
//!
//! # Timestamp semantics
//!
//! The timestamp records when the snapshot was *built*, not the moment the
//! encoded digits describe. Building a state from historical components
//! yields a current timestamp next to old digits.

use std::fmt;
use std::str::FromStr;

use crate::binary::{BinaryDigit, try_to_binary};
use crate::error::ClockError;
use crate::time_source::{LocalTimeSource, TimeSource};

/// Bit width of every tens digit (hours 0-2, minutes and seconds 0-5).
pub const TENS_BITS: u8 = 3;

/// Bit width of every units digit (0-9).
pub const UNITS_BITS: u8 = 4;

/// Hours, minutes, and seconds of a 24-hour time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeComponents {
    /// Hours, 0-23.
    pub hours: u8,
    /// Minutes, 0-59.
    pub minutes: u8,
    /// Seconds, 0-59.
    pub seconds: u8,
}

impl TimeComponents {
    /// Build validated components.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidTime`] if any field is out of range.
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Result<Self, ClockError> {
        let time = Self {
            hours,
            minutes,
            seconds,
        };
        time.validate()?;
        Ok(time)
    }

    /// Check `hours <= 23`, `minutes <= 59`, and `seconds <= 59`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidTime`] on any violation.
    pub const fn validate(&self) -> Result<(), ClockError> {
        if self.hours > 23 || self.minutes > 59 || self.seconds > 59 {
            return Err(ClockError::InvalidTime {
                hours: self.hours,
                minutes: self.minutes,
                seconds: self.seconds,
            });
        }
        Ok(())
    }
}

impl fmt::Display for TimeComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl FromStr for TimeComponents {
    type Err = ClockError;

    /// Parse `HH:MM:SS` (single-digit fields are accepted).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let malformed = || ClockError::MalformedTime {
            input: input.to_owned(),
        };
        let mut parts = input.trim().split(':');
        let mut next = || -> Result<u8, ClockError> {
            let part = parts.next().ok_or_else(malformed)?;
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse().map_err(|_err| malformed())
        };
        let hours = next()?;
        let minutes = next()?;
        let seconds = next()?;
        if parts.next().is_some() {
            return Err(malformed());
        }
        Self::new(hours, minutes, seconds)
    }
}

/// One of the three two-digit fields of a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    /// Hours (tens 0-2, units 0-9).
    Hours,
    /// Minutes (tens 0-5, units 0-9).
    Minutes,
    /// Seconds (tens 0-5, units 0-9).
    Seconds,
}

impl TimeField {
    /// All fields in display order.
    pub const ALL: [Self; 3] = [Self::Hours, Self::Minutes, Self::Seconds];

    /// Capitalised field name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hours => "Hours",
            Self::Minutes => "Minutes",
            Self::Seconds => "Seconds",
        }
    }

    /// Lower-case field name, used as a JSON key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }
}

/// An immutable binary-coded-decimal snapshot of a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockState {
    hours_tens: BinaryDigit,
    hours_units: BinaryDigit,
    minutes_tens: BinaryDigit,
    minutes_units: BinaryDigit,
    seconds_tens: BinaryDigit,
    seconds_units: BinaryDigit,
    timestamp: i64,
}

impl ClockState {
    /// The failure sentinel: `timestamp == 0`, every digit invalid.
    pub const FAILED: Self = Self {
        hours_tens: BinaryDigit::INVALID,
        hours_units: BinaryDigit::INVALID,
        minutes_tens: BinaryDigit::INVALID,
        minutes_units: BinaryDigit::INVALID,
        seconds_tens: BinaryDigit::INVALID,
        seconds_units: BinaryDigit::INVALID,
        timestamp: 0,
    };

    /// Encode validated components with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidTime`] if `time` is out of range.
    pub fn encode(time: &TimeComponents, timestamp: i64) -> Result<Self, ClockError> {
        time.validate()?;
        let (hours_tens, hours_units) = split(time.hours)?;
        let (minutes_tens, minutes_units) = split(time.minutes)?;
        let (seconds_tens, seconds_units) = split(time.seconds)?;
        Ok(Self {
            hours_tens,
            hours_units,
            minutes_tens,
            minutes_units,
            seconds_tens,
            seconds_units,
            timestamp,
        })
    }

    /// Epoch seconds at which the snapshot was built; 0 for the sentinel.
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Whether this is a successfully built snapshot.
    pub const fn is_valid(&self) -> bool {
        self.timestamp != 0
    }

    /// Hours tens digit (3 bits).
    pub const fn hours_tens(&self) -> &BinaryDigit {
        &self.hours_tens
    }

    /// Hours units digit (4 bits).
    pub const fn hours_units(&self) -> &BinaryDigit {
        &self.hours_units
    }

    /// Minutes tens digit (3 bits).
    pub const fn minutes_tens(&self) -> &BinaryDigit {
        &self.minutes_tens
    }

    /// Minutes units digit (4 bits).
    pub const fn minutes_units(&self) -> &BinaryDigit {
        &self.minutes_units
    }

    /// Seconds tens digit (3 bits).
    pub const fn seconds_tens(&self) -> &BinaryDigit {
        &self.seconds_tens
    }

    /// Seconds units digit (4 bits).
    pub const fn seconds_units(&self) -> &BinaryDigit {
        &self.seconds_units
    }

    /// The `(tens, units)` digits of one field.
    pub const fn digits(&self, field: TimeField) -> (&BinaryDigit, &BinaryDigit) {
        match field {
            TimeField::Hours => (&self.hours_tens, &self.hours_units),
            TimeField::Minutes => (&self.minutes_tens, &self.minutes_units),
            TimeField::Seconds => (&self.seconds_tens, &self.seconds_units),
        }
    }

    /// Decimal value of one field, rebuilt from its digits.
    pub fn value(&self, field: TimeField) -> u8 {
        let (tens, units) = self.digits(field);
        tens.decimal_value()
            .saturating_mul(10)
            .saturating_add(units.decimal_value())
    }

    /// Decoded hours.
    pub fn hours(&self) -> u8 {
        self.value(TimeField::Hours)
    }

    /// Decoded minutes.
    pub fn minutes(&self) -> u8 {
        self.value(TimeField::Minutes)
    }

    /// Decoded seconds.
    pub fn seconds(&self) -> u8 {
        self.value(TimeField::Seconds)
    }

    /// The time of day the digits encode.
    pub fn time(&self) -> TimeComponents {
        TimeComponents {
            hours: self.value(TimeField::Hours),
            minutes: self.value(TimeField::Minutes),
            seconds: self.value(TimeField::Seconds),
        }
    }

    /// `HH:MM:SS` rebuilt from the digits.
    pub fn time_string(&self) -> String {
        self.time().to_string()
    }
}

/// Split a two-digit value into encoded tens and units digits.
fn split(value: u8) -> Result<(BinaryDigit, BinaryDigit), ClockError> {
    let tens = try_to_binary(value / 10, TENS_BITS)?;
    let units = try_to_binary(value % 10, UNITS_BITS)?;
    Ok((tens, units))
}

/// Builds [`ClockState`] snapshots from a [`TimeSource`].
///
/// The source supplies both the time of day (for
/// [`current_state`](Self::current_state)) and the capture timestamp for
/// every snapshot.
#[derive(Debug, Clone, Default)]
pub struct ClockStateBuilder<S = LocalTimeSource> {
    source: S,
}

impl<S: TimeSource> ClockStateBuilder<S> {
    /// Create a builder reading from `source`.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Borrow the underlying time source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Encode supplied components, stamped with the source's current time.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidTime`] for out-of-range components, or
    /// [`ClockError::SystemTimeUnavailable`] if the timestamp cannot be read.
    pub fn try_from_time(&self, time: &TimeComponents) -> Result<ClockState, ClockError> {
        time.validate()?;
        let timestamp = self.source.unix_timestamp()?;
        ClockState::encode(time, timestamp)
    }

    /// Encode supplied components, returning [`ClockState::FAILED`] for
    /// absent or invalid input.
    pub fn from_time(&self, time: Option<&TimeComponents>) -> ClockState {
        time.ok_or(ClockError::MissingInput {
            what: "time components",
        })
        .and_then(|time| self.try_from_time(time))
        .unwrap_or_else(|err| {
            tracing::debug!(error = %err, "clock state construction failed");
            ClockState::FAILED
        })
    }

    /// Read the source and encode the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::SystemTimeUnavailable`] if the source cannot be
    /// read, or [`ClockError::InvalidTime`] if it reports an impossible time.
    pub fn try_current_state(&self) -> Result<ClockState, ClockError> {
        let time = self.source.now()?;
        self.try_from_time(&time)
    }

    /// Read the source and encode the current time, returning
    /// [`ClockState::FAILED`] on any failure.
    pub fn current_state(&self) -> ClockState {
        self.try_current_state().unwrap_or_else(|err| {
            tracing::debug!(error = %err, "current clock state unavailable");
            ClockState::FAILED
        })
    }
}
