//! Binary-coded-decimal clock core.
//!
//! This crate turns a wall-clock time into an immutable [`ClockState`]
//! snapshot (each two-digit field split into tens and units, each digit
//! encoded as a fixed-width bit vector) and fans that snapshot out to any
//! number of pluggable renderers through a [`DisplayRegistry`].
//!
//! # Modules
//!
//! - [`binary`] -- [`BinaryDigit`] and the `to_binary` / `to_decimal`
//!   conversions.
//! - [`state`] -- [`TimeComponents`], [`ClockState`], and the
//!   [`ClockStateBuilder`] that produces snapshots.
//! - [`time_source`] -- The [`TimeSource`] trait with host-clock and fixed
//!   implementations.
//! - [`registry`] -- The bounded [`DisplayRegistry`].
//! - [`render`] -- The [`Renderer`] contract and the built-in emoji, ASCII,
//!   JSON, compact, and raw formats.
//! - [`error`] -- Error types shared across the crate.
//!
//! # Data flow
//!
//! ```text
//! TimeSource --> ClockStateBuilder --> ClockState --> DisplayRegistry --> Renderer(s)
//! ```

pub mod binary;
pub mod error;
pub mod registry;
pub mod render;
pub mod state;
pub mod time_source;

pub use binary::{BinaryDigit, DigitFormat, MAX_BIT_COUNT, to_binary, to_decimal, try_to_binary};
pub use error::{ClockError, RegistryError, RenderError};
pub use registry::{DEFAULT_CAPACITY, DispatchSummary, DisplayRegistry, RegistrationId};
pub use render::{DisplayMode, Renderer, WriterRenderer};
pub use state::{ClockState, ClockStateBuilder, TimeComponents, TimeField};
pub use time_source::{FixedTimeSource, LocalTimeSource, TimeSource};

/// Library version, reported in the refresh-loop banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
