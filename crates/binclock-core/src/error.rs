//! Error types for the binary clock core.
//!
//! The conversion and state layers also expose sentinel-returning
//! functions (`bit_count == 0`, `timestamp == 0`); those are thin wrappers
//! that collapse a [`ClockError`] into the sentinel value.

/// Errors produced while converting digits or building clock state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// A conversion was requested with a bit count outside `1..=6`.
    #[error("Bit count out of valid range (1-6): got {bit_count}")]
    InvalidBitCount {
        /// The rejected bit count.
        bit_count: u8,
    },

    /// Hours, minutes, or seconds fell outside their valid range.
    #[error("Invalid time components provided: {hours:02}:{minutes:02}:{seconds:02}")]
    InvalidTime {
        /// Supplied hours (valid range 0-23).
        hours: u8,
        /// Supplied minutes (valid range 0-59).
        minutes: u8,
        /// Supplied seconds (valid range 0-59).
        seconds: u8,
    },

    /// A time-of-day string was not in `HH:MM:SS` form.
    #[error("Malformed time '{input}': expected HH:MM:SS")]
    MalformedTime {
        /// The rejected input.
        input: String,
    },

    /// A required input was absent.
    #[error("Missing required input: {what}")]
    MissingInput {
        /// Name of the missing input.
        what: &'static str,
    },

    /// The host clock could not be read.
    #[error("System time retrieval failed: {reason}")]
    SystemTimeUnavailable {
        /// Description of the failure.
        reason: String,
    },
}

/// Errors produced by [`DisplayRegistry`](crate::DisplayRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Every slot in the registry is occupied.
    #[error("display registry is full (capacity {capacity})")]
    Full {
        /// The registry's slot bound.
        capacity: usize,
    },

    /// No active registration carries this id.
    #[error("no active display registration with id {id}")]
    NotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// A raw id could not name any registration.
    #[error("invalid display registration id {raw}")]
    InvalidId {
        /// The rejected raw value.
        raw: i64,
    },

    /// The registry has issued every id it can represent.
    #[error("display registration ids exhausted")]
    IdsExhausted,
}

/// Errors a renderer can report while writing its output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing to the output stream failed.
    #[error("render I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the JSON view failed.
    #[error("render JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
