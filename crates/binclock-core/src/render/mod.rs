//! Renderer contract and built-in output formats.
//!
//! A [`Renderer`] consumes a [`ClockState`] by shared reference and
//! produces some side effect (usually bytes on a stream). Any context a
//! renderer needs -- an output stream, a buffer, a counter -- is owned by
//! the renderer itself or captured by a closure.
//!
//! The five built-in layouts are selected with [`DisplayMode`]:
//!
//! | Mode      | Output                                              |
//! |-----------|-----------------------------------------------------|
//! | `emoji`   | Header, `Time: HH:MM:SS`, one moon-glyph row per field |
//! | `binary`  | Same layout with `0` / `1` characters               |
//! | `json`    | Object with `timestamp`, `time`, and bit arrays     |
//! | `compact` | `HH:MM:SS [ttt uuuu : ttt uuuu : ttt uuuu]`          |
//! | `raw`     | Per-digit `bit_count`, `decimal_value`, and bits    |

mod json;
mod text;

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::state::ClockState;

pub use json::json;
pub use text::{ascii, compact, emoji, raw};

/// Something that displays clock states.
///
/// Renderers receive the state by shared reference and cannot change it.
/// `Send` is required so a [`DisplayRegistry`](crate::DisplayRegistry)
/// holding renderers can move behind a mutex shared between threads.
pub trait Renderer: Send {
    /// Display one state.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the output cannot be produced or written.
    fn render(&mut self, state: &ClockState) -> Result<(), RenderError>;
}

impl<F> Renderer for F
where
    F: FnMut(&ClockState) -> Result<(), RenderError> + Send,
{
    fn render(&mut self, state: &ClockState) -> Result<(), RenderError> {
        self(state)
    }
}

/// Built-in output layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Moon glyphs, one per bit.
    #[default]
    Emoji,
    /// `0` / `1` characters.
    Binary,
    /// Machine-readable JSON.
    Json,
    /// One line per state.
    Compact,
    /// Field-by-field dump of every digit.
    Raw,
}

impl DisplayMode {
    /// Every mode, in documentation order.
    pub const ALL: [Self; 5] = [
        Self::Emoji,
        Self::Binary,
        Self::Json,
        Self::Compact,
        Self::Raw,
    ];

    /// The mode's configuration name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Emoji => "emoji",
            Self::Binary => "binary",
            Self::Json => "json",
            Self::Compact => "compact",
            Self::Raw => "raw",
        }
    }

    /// Format `state` in this layout.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if JSON serialization fails.
    pub fn format(self, state: &ClockState) -> Result<String, RenderError> {
        Ok(match self {
            Self::Emoji => emoji(state),
            Self::Binary => ascii(state),
            Self::Json => json(state)?,
            Self::Compact => compact(state),
            Self::Raw => raw(state),
        })
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders a [`DisplayMode`] layout to any writer.
///
/// Output is flushed after every state.
#[derive(Debug)]
pub struct WriterRenderer<W> {
    mode: DisplayMode,
    writer: W,
}

impl<W: Write + Send> WriterRenderer<W> {
    /// Render `mode` into `writer`.
    pub const fn new(mode: DisplayMode, writer: W) -> Self {
        Self { mode, writer }
    }

    /// The layout this renderer produces.
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Consume the renderer and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterRenderer<io::Stdout> {
    /// Render `mode` to standard output.
    pub fn stdout(mode: DisplayMode) -> Self {
        Self::new(mode, io::stdout())
    }
}

impl<W: Write + Send> Renderer for WriterRenderer<W> {
    fn render(&mut self, state: &ClockState) -> Result<(), RenderError> {
        let text = self.mode.format(state)?;
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
