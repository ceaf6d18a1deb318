//! JSON layout.
//!
//! Objects are indented two spaces per level; bit arrays stay on one line:
//!
//! ```text
//! {
//!   "timestamp": 1700000000,
//!   "time": "09:05:03",
//!   "binary": {
//!     "hours": {
//!       "tens": [0,0,0],
//!       "units": [1,0,0,1]
//!     },
//!     ...
//!   }
//! }
//! ```

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::binary::BinaryDigit;
use crate::error::RenderError;
use crate::state::{ClockState, TimeField};

#[derive(Serialize)]
struct JsonState {
    timestamp: i64,
    time: String,
    binary: JsonFields,
}

#[derive(Serialize)]
struct JsonFields {
    hours: JsonDigits,
    minutes: JsonDigits,
    seconds: JsonDigits,
}

#[derive(Serialize)]
struct JsonDigits {
    tens: Vec<u8>,
    units: Vec<u8>,
}

impl JsonDigits {
    fn of(state: &ClockState, field: TimeField) -> Self {
        let (tens, units) = state.digits(field);
        Self {
            tens: bit_values(tens),
            units: bit_values(units),
        }
    }
}

fn bit_values(digit: &BinaryDigit) -> Vec<u8> {
    digit.significant_bits().iter().map(|&bit| u8::from(bit)).collect()
}

/// Pretty objects, compact arrays.
#[derive(Debug, Default)]
struct ClockFormatter {
    depth: usize,
    has_value: bool,
}

impl ClockFormatter {
    fn indent<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for _ in 0..self.depth {
            writer.write_all(b"  ")?;
        }
        Ok(())
    }
}

impl Formatter for ClockFormatter {
    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.depth = self.depth.saturating_add(1);
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        if self.has_value {
            writer.write_all(b"\n")?;
            self.indent(writer)?;
        }
        writer.write_all(b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if !first {
            writer.write_all(b",")?;
        }
        writer.write_all(b"\n")?;
        self.indent(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }
}

/// Format `state` as a JSON object followed by a newline.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if serialization fails.
pub fn json(state: &ClockState) -> Result<String, RenderError> {
    let view = JsonState {
        timestamp: state.timestamp(),
        time: state.time_string(),
        binary: JsonFields {
            hours: JsonDigits::of(state, TimeField::Hours),
            minutes: JsonDigits::of(state, TimeField::Minutes),
            seconds: JsonDigits::of(state, TimeField::Seconds),
        },
    };

    let mut buffer = Vec::with_capacity(256);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, ClockFormatter::default());
    view.serialize(&mut serializer)?;
    buffer.push(b'\n');
    String::from_utf8(buffer)
        .map_err(|err| RenderError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::state::TimeComponents;

    fn state(hours: u8, minutes: u8, seconds: u8) -> ClockState {
        let time = TimeComponents::new(hours, minutes, seconds).unwrap();
        ClockState::encode(&time, 1_700_000_000).unwrap()
    }

    #[test]
    fn exact_layout() {
        let expected = r#"{
  "timestamp": 1700000000,
  "time": "09:05:03",
  "binary": {
    "hours": {
      "tens": [0,0,0],
      "units": [1,0,0,1]
    },
    "minutes": {
      "tens": [0,0,0],
      "units": [0,1,0,1]
    },
    "seconds": {
      "tens": [0,0,0],
      "units": [0,0,1,1]
    }
  }
}
"#;
        assert_eq!(json(&state(9, 5, 3)).unwrap(), expected);
    }

    #[test]
    fn parses_as_json_with_field_widths() {
        let value: Value = serde_json::from_str(&json(&state(14, 30, 45)).unwrap()).unwrap();
        assert_eq!(value["timestamp"], 1_700_000_000);
        assert_eq!(value["time"], "14:30:45");
        for key in ["hours", "minutes", "seconds"] {
            assert_eq!(value["binary"][key]["tens"].as_array().unwrap().len(), 3);
            assert_eq!(value["binary"][key]["units"].as_array().unwrap().len(), 4);
        }
        assert_eq!(value["binary"]["hours"]["tens"], serde_json::json!([0, 0, 1]));
        assert_eq!(value["binary"]["seconds"]["units"], serde_json::json!([0, 1, 0, 1]));
    }

    #[test]
    fn failed_state_has_empty_arrays() {
        let value: Value = serde_json::from_str(&json(&ClockState::FAILED).unwrap()).unwrap();
        assert_eq!(value["timestamp"], 0);
        assert_eq!(value["binary"]["hours"]["tens"], serde_json::json!([]));
    }
}
